//! Alert settings persistence
//!
//! Stores alert preferences and the rain notification cooldown marker in a
//! single JSON file. Missing or corrupt files fall back to defaults so the
//! scheduler always has a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use shared::models::{AlertSettings, UpdateSettingsInput};

/// File-backed settings store
#[derive(Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

/// On-disk document shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    settings: AlertSettings,

    /// Epoch milliseconds of the last rain notification, if any
    #[serde(default)]
    last_rain_notified_ms: Option<i64>,
}

impl SettingsStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted alert settings, or defaults when absent or unreadable
    pub fn load_settings(&self) -> AlertSettings {
        self.read_document().settings
    }

    /// Merge a partial update into the persisted settings and return the result
    pub fn save_settings(&self, input: &UpdateSettingsInput) -> AppResult<AlertSettings> {
        let mut document = self.read_document();
        document.settings = document.settings.apply(input);
        self.write_document(&document)
            .map_err(|e| AppError::StorageError(format!("failed to write settings: {}", e)))?;
        Ok(document.settings)
    }

    /// Epoch milliseconds of the last rain notification, if one was recorded
    pub fn last_rain_notified(&self) -> Option<i64> {
        self.read_document().last_rain_notified_ms
    }

    /// Record the time of a rain notification. Failures are logged and
    /// swallowed so a disk problem never blocks an alert from firing.
    pub fn mark_rain_notified(&self, timestamp_ms: i64) {
        let mut document = self.read_document();
        document.last_rain_notified_ms = Some(timestamp_ms);
        if let Err(e) = self.write_document(&document) {
            tracing::warn!("Failed to persist rain notification marker: {}", e);
        }
    }

    /// Load the on-disk document, or an empty one if missing or corrupt
    fn read_document(&self) -> SettingsDocument {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => SettingsDocument::default(),
        }
    }

    /// Write to a temp file then rename to avoid torn reads
    fn write_document(&self, document: &SettingsDocument) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(document).map_err(std::io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.json"))
    }

    #[test]
    fn returns_defaults_when_file_is_missing() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let settings = store.load_settings();
        assert!(settings.maghrib_alert_enabled);
        assert_eq!(settings.alert_lead_minutes, 15);
        assert_eq!(store.last_rain_notified(), None);
    }

    #[test]
    fn returns_defaults_when_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path);
        let settings = store.load_settings();
        assert_eq!(settings, AlertSettings::default());
    }

    #[test]
    fn merges_partial_updates_and_persists() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let update = UpdateSettingsInput {
            alert_lead_minutes: Some(30),
            sound_enabled: Some(false),
            ..Default::default()
        };
        let merged = store.save_settings(&update).unwrap();
        assert_eq!(merged.alert_lead_minutes, 30);
        assert!(!merged.sound_enabled);
        assert!(merged.maghrib_alert_enabled);

        // A fresh store over the same file sees the persisted values
        let reloaded = store_in(&dir).load_settings();
        assert_eq!(reloaded, merged);
    }

    #[test]
    fn rain_marker_survives_reload() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.mark_rain_notified(1_724_300_000_000);
        assert_eq!(store.last_rain_notified(), Some(1_724_300_000_000));
        assert_eq!(
            store_in(&dir).last_rain_notified(),
            Some(1_724_300_000_000)
        );

        // Settings writes keep the marker
        store.save_settings(&UpdateSettingsInput::default()).unwrap();
        assert_eq!(store.last_rain_notified(), Some(1_724_300_000_000));
    }
}

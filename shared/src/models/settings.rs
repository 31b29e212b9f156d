//! Alert settings persisted in the key-value settings store

use serde::{Deserialize, Serialize};

/// Lead times (minutes before Maghrib) a user may pick from
pub const ALERT_LEAD_CHOICES: [u32; 6] = [5, 10, 15, 20, 30, 45];

/// User-facing alert settings
///
/// Every field is persisted under its own key; a missing or corrupt key
/// falls back to the `Default` value for that field alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertSettings {
    #[serde(default = "default_enabled")]
    pub maghrib_alert_enabled: bool,
    /// Minutes of advance warning before Maghrib, one of `ALERT_LEAD_CHOICES`
    #[serde(default = "default_lead_minutes")]
    pub alert_lead_minutes: u32,
    #[serde(default = "default_enabled")]
    pub rain_alert_enabled: bool,
    #[serde(default = "default_enabled")]
    pub sound_enabled: bool,
    #[serde(default = "default_enabled")]
    pub vibration_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_lead_minutes() -> u32 {
    15
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            maghrib_alert_enabled: true,
            alert_lead_minutes: 15,
            rain_alert_enabled: true,
            sound_enabled: true,
            vibration_enabled: true,
        }
    }
}

impl AlertSettings {
    /// Overlay the provided fields of a partial update
    pub fn apply(&self, update: &UpdateSettingsInput) -> Self {
        Self {
            maghrib_alert_enabled: update
                .maghrib_alert_enabled
                .unwrap_or(self.maghrib_alert_enabled),
            alert_lead_minutes: update.alert_lead_minutes.unwrap_or(self.alert_lead_minutes),
            rain_alert_enabled: update.rain_alert_enabled.unwrap_or(self.rain_alert_enabled),
            sound_enabled: update.sound_enabled.unwrap_or(self.sound_enabled),
            vibration_enabled: update.vibration_enabled.unwrap_or(self.vibration_enabled),
        }
    }
}

/// Partial settings update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettingsInput {
    pub maghrib_alert_enabled: Option<bool>,
    pub alert_lead_minutes: Option<u32>,
    pub rain_alert_enabled: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub vibration_enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AlertSettings::default();
        assert!(settings.maghrib_alert_enabled);
        assert_eq!(settings.alert_lead_minutes, 15);
        assert!(settings.rain_alert_enabled);
        assert!(settings.sound_enabled);
        assert!(settings.vibration_enabled);
    }

    #[test]
    fn test_apply_overlays_only_provided_fields() {
        let settings = AlertSettings::default();
        let update = UpdateSettingsInput {
            alert_lead_minutes: Some(30),
            rain_alert_enabled: Some(false),
            ..Default::default()
        };

        let merged = settings.apply(&update);
        assert_eq!(merged.alert_lead_minutes, 30);
        assert!(!merged.rain_alert_enabled);
        assert!(merged.maghrib_alert_enabled);
        assert!(merged.sound_enabled);
    }

    #[test]
    fn test_default_lead_is_a_valid_choice() {
        assert!(ALERT_LEAD_CHOICES.contains(&AlertSettings::default().alert_lead_minutes));
    }

    #[test]
    fn test_partial_document_fills_missing_fields() {
        let settings: AlertSettings =
            serde_json::from_str(r#"{"alert_lead_minutes": 20}"#).unwrap();
        assert_eq!(settings.alert_lead_minutes, 20);
        assert!(settings.maghrib_alert_enabled);
        assert!(settings.rain_alert_enabled);
    }
}

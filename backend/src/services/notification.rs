//! Notification delivery service
//!
//! Keeps a bounded in-app notification feed and optionally forwards alerts
//! to a push webhook endpoint

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::PushConfig;
use crate::error::{AppError, AppResult};
use crate::services::settings::SettingsStore;
use shared::models::{InAppNotification, NotificationChannel};

/// Maximum number of notifications retained in the in-app feed
const FEED_CAPACITY: usize = 50;

/// Coalescing tag attached to every push payload
const PUSH_TAG: &str = "prayer-weather-alert";

/// Delivery target for alert notifications
///
/// Fire-and-forget: implementations absorb delivery failures and never
/// report them back to the caller.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn show(&self, title: &str, body: &str);

    /// Delivery channel currently available. Callers may log this but
    /// must not gate alert checks on it.
    fn channel(&self) -> NotificationChannel;
}

// ============================================================================
// Push Webhook Client
// ============================================================================

/// Client for forwarding notifications to a configured push webhook
#[derive(Clone)]
pub struct PushClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct PushPayload<'a> {
    title: &'a str,
    body: &'a str,
    tag: &'a str,
    sound: bool,
    vibrate: bool,
}

impl PushClient {
    /// Create a new PushClient
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    /// Build from configuration; an empty endpoint disables push delivery
    pub fn from_config(config: &PushConfig) -> Option<Self> {
        if config.endpoint.is_empty() {
            None
        } else {
            Some(Self::new(config.endpoint.clone()))
        }
    }

    /// POST a notification to the webhook
    pub async fn send(
        &self,
        title: &str,
        body: &str,
        sound: bool,
        vibrate: bool,
    ) -> Result<(), String> {
        let payload = PushPayload {
            title,
            body,
            tag: PUSH_TAG,
            sound,
            vibrate,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Push request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Push endpoint returned {}", response.status()));
        }

        Ok(())
    }
}

// ============================================================================
// Notification Service
// ============================================================================

/// Records alerts in the in-app feed and forwards them to the push webhook
/// when one is configured
#[derive(Clone)]
pub struct NotificationService {
    store: SettingsStore,
    push_client: Option<PushClient>,
    feed: Arc<RwLock<VecDeque<InAppNotification>>>,
}

impl NotificationService {
    /// Create a new NotificationService
    pub fn new(store: SettingsStore, push_client: Option<PushClient>) -> Self {
        Self {
            store,
            push_client,
            feed: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Channel notifications are currently delivered through
    pub fn channel(&self) -> NotificationChannel {
        if self.push_client.is_some() {
            NotificationChannel::Push
        } else {
            NotificationChannel::InApp
        }
    }

    /// Recent notifications, newest first
    pub async fn recent(&self) -> Vec<InAppNotification> {
        self.feed.read().await.iter().cloned().collect()
    }

    /// Number of unread notifications in the feed
    pub async fn unread_count(&self) -> usize {
        self.feed.read().await.iter().filter(|n| !n.is_read).count()
    }

    /// Mark a single notification as read
    pub async fn mark_read(&self, id: Uuid) -> AppResult<InAppNotification> {
        let mut feed = self.feed.write().await;
        match feed.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(notification.clone())
            }
            None => Err(AppError::NotFound(format!("Notification {}", id))),
        }
    }

    /// Mark every notification as read, returning how many changed
    pub async fn mark_all_read(&self) -> usize {
        let mut feed = self.feed.write().await;
        let mut updated = 0;
        for notification in feed.iter_mut() {
            if !notification.is_read {
                notification.is_read = true;
                updated += 1;
            }
        }
        updated
    }

    /// Append to the feed, evicting the oldest entries past capacity
    async fn record(&self, title: &str, body: &str) -> InAppNotification {
        let notification = InAppNotification::new(title.to_string(), body.to_string());
        let mut feed = self.feed.write().await;
        feed.push_front(notification.clone());
        feed.truncate(FEED_CAPACITY);
        notification
    }
}

#[async_trait]
impl NotificationSink for NotificationService {
    async fn show(&self, title: &str, body: &str) {
        // Sound and vibration preferences are read at delivery time so a
        // settings change applies to the very next alert
        let settings = self.store.load_settings();

        self.record(title, body).await;
        tracing::info!("Notification recorded: {}", title);

        if let Some(push) = &self.push_client {
            if let Err(e) = push
                .send(title, body, settings.sound_enabled, settings.vibration_enabled)
                .await
            {
                tracing::warn!("Push delivery failed: {}", e);
            }
        }
    }

    fn channel(&self) -> NotificationChannel {
        NotificationService::channel(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn service_in(dir: &tempfile::TempDir) -> NotificationService {
        let store = SettingsStore::new(dir.path().join("settings.json"));
        NotificationService::new(store, None)
    }

    #[tokio::test]
    async fn records_notifications_newest_first() {
        let dir = tempdir().unwrap();
        let service = service_in(&dir);

        service.show("First", "body one").await;
        service.show("Second", "body two").await;

        let feed = service.recent().await;
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].title, "Second");
        assert_eq!(feed[1].title, "First");
        assert!(!feed[0].is_read);
    }

    #[tokio::test]
    async fn feed_is_capped_at_capacity() {
        let dir = tempdir().unwrap();
        let service = service_in(&dir);

        for i in 0..FEED_CAPACITY + 5 {
            service.show(&format!("Alert {}", i), "body").await;
        }

        let feed = service.recent().await;
        assert_eq!(feed.len(), FEED_CAPACITY);
        // The newest entry survives, the oldest were evicted
        assert_eq!(feed[0].title, format!("Alert {}", FEED_CAPACITY + 4));
    }

    #[tokio::test]
    async fn tracks_unread_counts() {
        let dir = tempdir().unwrap();
        let service = service_in(&dir);

        service.show("One", "body").await;
        service.show("Two", "body").await;
        assert_eq!(service.unread_count().await, 2);

        let id = service.recent().await[0].id;
        let updated = service.mark_read(id).await.unwrap();
        assert!(updated.is_read);
        assert_eq!(service.unread_count().await, 1);

        assert_eq!(service.mark_all_read().await, 1);
        assert_eq!(service.unread_count().await, 0);
    }

    #[tokio::test]
    async fn mark_read_rejects_unknown_id() {
        let dir = tempdir().unwrap();
        let service = service_in(&dir);

        let result = service.mark_read(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn channel_reflects_push_configuration() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let in_app = NotificationService::new(store.clone(), None);
        assert_eq!(in_app.channel(), NotificationChannel::InApp);

        let push = NotificationService::new(
            store,
            Some(PushClient::new("http://127.0.0.1:9/push".to_string())),
        );
        assert_eq!(push.channel(), NotificationChannel::Push);
    }
}

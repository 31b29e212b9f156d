//! Notification models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel the notification service is currently able to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    /// A push webhook is configured in addition to the in-app feed
    Push,
    /// In-app feed only
    InApp,
}

/// An entry in the in-app notification feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InAppNotification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

impl InAppNotification {
    pub fn new(title: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            sent_at: Utc::now(),
            is_read: false,
        }
    }
}

//! HTTP request handlers for Maghrib Companion

pub mod health;
pub mod location;
pub mod notification;
pub mod prayer;
pub mod scheduler;
pub mod settings;
pub mod weather;

pub use health::health_check;
pub use location::resolve_location;
pub use notification::{get_notifications, get_unread_count, mark_all_as_read, mark_as_read};
pub use prayer::get_prayer_times;
pub use scheduler::{get_scheduler_status, start_scheduler, stop_scheduler};
pub use settings::{get_settings, update_settings};
pub use weather::get_current_weather;

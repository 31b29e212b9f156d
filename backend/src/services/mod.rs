//! Business logic services for Maghrib Companion

pub mod location;
pub mod notification;
pub mod prayer;
pub mod scheduler;
pub mod settings;
pub mod weather;

pub use location::LocationService;
pub use notification::{NotificationService, NotificationSink, PushClient};
pub use prayer::PrayerTimesService;
pub use scheduler::{AlertScheduler, SchedulerHandle};
pub use settings::SettingsStore;
pub use weather::WeatherService;

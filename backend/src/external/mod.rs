//! External API integrations

pub mod geocoding;
pub mod prayer;
pub mod weather;

pub use geocoding::GeocodingClient;
pub use prayer::PrayerTimesClient;
pub use weather::WeatherClient;

//! Configuration management for the Maghrib Companion service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with MAGHRIB_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Reverse geocoding configuration
    pub geocoding: GeocodingConfig,

    /// Prayer times API configuration
    pub prayer: PrayerApiConfig,

    /// Weather API configuration
    pub weather: WeatherApiConfig,

    /// Push delivery configuration
    pub push: PushConfig,

    /// Settings persistence configuration
    pub storage: StorageConfig,

    /// Alert scheduler configuration
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim reverse geocoding base URL
    pub base_url: String,

    /// User-Agent header required by the Nominatim usage policy
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PrayerApiConfig {
    /// Aladhan API base URL
    pub base_url: String,

    /// Prayer time calculation method (2 = Islamic Society of North America)
    pub method: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherApiConfig {
    /// OpenWeatherMap API base URL
    pub base_url: String,

    /// Open-Meteo base URL, used when no API key is configured
    pub fallback_base_url: String,

    /// OpenWeatherMap API key (empty disables the primary provider)
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PushConfig {
    /// Webhook endpoint for push delivery (empty disables push)
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the JSON file holding persisted alert settings
    pub settings_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Start the alert scheduler on boot
    pub auto_start: bool,

    /// Latitude used for auto-started sessions
    pub latitude: f64,

    /// Longitude used for auto-started sessions
    pub longitude: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MAGHRIB_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("geocoding.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.user_agent", "MaghribPrayerApp/1.0")?
            .set_default("prayer.base_url", "https://api.aladhan.com/v1")?
            .set_default("prayer.method", 2)?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.fallback_base_url", "https://api.open-meteo.com/v1")?
            .set_default("weather.api_key", "")?
            .set_default("push.endpoint", "")?
            .set_default("storage.settings_path", "data/settings.json")?
            .set_default("scheduler.auto_start", false)?
            // Mecca, used when no coordinates are supplied at startup
            .set_default("scheduler.latitude", 21.4225)?
            .set_default("scheduler.longitude", 39.8262)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MAGHRIB_ prefix)
            .add_source(
                Environment::with_prefix("MAGHRIB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

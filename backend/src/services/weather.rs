//! Weather service with provider fallback
//!
//! Wraps the weather clients and absorbs provider failures so callers
//! always receive a usable snapshot

use crate::config::Config;
use crate::error::AppResult;
use crate::external::weather::WeatherClient;
use shared::models::WeatherSnapshot;

/// Weather service for fetching current conditions
#[derive(Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

impl WeatherService {
    /// Create a new WeatherService
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    /// Create a WeatherService from application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(WeatherClient::with_base_urls(
            config.weather.api_key.clone(),
            config.weather.base_url.clone(),
            config.weather.fallback_base_url.clone(),
        ))
    }

    /// Current conditions at the given coordinates
    ///
    /// Tries OpenWeatherMap when a key is configured, then Open-Meteo, and
    /// finally the fixed fallback conditions. Never fails; the fallback
    /// reports no rain, so a provider outage suppresses rain alerts rather
    /// than inventing them.
    pub async fn current_snapshot(&self, latitude: f64, longitude: f64) -> WeatherSnapshot {
        match self.fetch(latitude, longitude).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("All weather providers failed, using fallback conditions: {}", e);
                WeatherSnapshot::fallback()
            }
        }
    }

    async fn fetch(&self, latitude: f64, longitude: f64) -> AppResult<WeatherSnapshot> {
        if self.client.has_api_key() {
            match self.client.get_current_weather(latitude, longitude).await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => {
                    tracing::warn!("OpenWeatherMap fetch failed, trying Open-Meteo: {}", e);
                }
            }
        }

        self.client
            .get_current_weather_fallback(latitude, longitude)
            .await
    }
}

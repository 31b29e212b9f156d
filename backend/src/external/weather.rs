//! Weather API client for fetching current conditions
//!
//! Integrates with OpenWeatherMap when an API key is configured and with
//! the keyless Open-Meteo API as a secondary provider

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::models::{WeatherCondition, WeatherSnapshot};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    fallback_base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// Open-Meteo API response for current weather
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    precipitation: f64,
    weather_code: i32,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            fallback_base_url: "https://api.open-meteo.com/v1".to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URLs (for testing)
    pub fn with_base_urls(api_key: String, base_url: String, fallback_base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            fallback_base_url,
        }
    }

    /// Whether an OpenWeatherMap API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Fetch current weather conditions from OpenWeatherMap
    pub async fn get_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherSnapshot> {
        if self.api_key.is_empty() {
            return Err(AppError::ExternalService(
                "no OpenWeatherMap API key configured".to_string(),
            ));
        }

        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_owm_response(data))
    }

    /// Fetch current weather conditions from Open-Meteo (no API key required)
    pub async fn get_current_weather_fallback(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherSnapshot> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,relative_humidity_2m,precipitation,weather_code",
            self.fallback_base_url, latitude, longitude
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalService(format!("Open-Meteo request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Open-Meteo error: {} - {}",
                status, body
            )));
        }

        let data: OpenMeteoResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse Open-Meteo response: {}", e))
        })?;

        Ok(convert_open_meteo_response(data))
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_owm_response(data: OWMCurrentResponse) -> WeatherSnapshot {
    let weather = data.weather.first();

    WeatherSnapshot {
        temperature_celsius: data.main.temp.round() as i32,
        humidity_percent: data.main.humidity,
        condition: weather
            .map(|w| WeatherCondition::from_provider(&w.main))
            .unwrap_or(WeatherCondition::Clear),
        description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        precipitation_mm: data.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
    }
}

/// Convert Open-Meteo current response to our format
fn convert_open_meteo_response(data: OpenMeteoResponse) -> WeatherSnapshot {
    let (condition, description) = wmo_condition(data.current.weather_code);

    WeatherSnapshot {
        temperature_celsius: data.current.temperature_2m.round() as i32,
        humidity_percent: data.current.relative_humidity_2m.round() as i32,
        condition,
        description: description.to_string(),
        precipitation_mm: data.current.precipitation,
    }
}

/// Map a WMO weather code to a condition and short description
fn wmo_condition(code: i32) -> (WeatherCondition, &'static str) {
    match code {
        0 => (WeatherCondition::Clear, "clear sky"),
        1..=3 => (WeatherCondition::Clouds, "partly cloudy"),
        45 | 48 => (WeatherCondition::Clouds, "fog"),
        51..=57 => (WeatherCondition::Rain, "drizzle"),
        61..=67 => (WeatherCondition::Rain, "rain"),
        71..=77 | 85 | 86 => (WeatherCondition::Clouds, "snow"),
        80..=82 => (WeatherCondition::Rain, "rain showers"),
        95..=99 => (WeatherCondition::Thunderstorm, "thunderstorm"),
        _ => (WeatherCondition::Clear, "clear sky"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owm_response(main: &str, description: &str, temp: f64, rain_1h: Option<f64>) -> OWMCurrentResponse {
        OWMCurrentResponse {
            weather: vec![OWMWeather {
                main: main.to_string(),
                description: description.to_string(),
            }],
            main: OWMMain {
                temp,
                humidity: 60,
            },
            rain: rain_1h.map(|mm| OWMRain { one_hour: Some(mm) }),
        }
    }

    #[test]
    fn converts_owm_rain_response() {
        let snapshot = convert_owm_response(owm_response("Rain", "light rain", 27.6, Some(0.4)));

        assert_eq!(snapshot.temperature_celsius, 28);
        assert_eq!(snapshot.humidity_percent, 60);
        assert_eq!(snapshot.condition, WeatherCondition::Rain);
        assert_eq!(snapshot.description, "light rain");
        assert!(snapshot.is_raining());
    }

    #[test]
    fn converts_owm_clear_response() {
        let snapshot = convert_owm_response(owm_response("Clear", "clear sky", 21.3, None));

        assert_eq!(snapshot.temperature_celsius, 21);
        assert_eq!(snapshot.condition, WeatherCondition::Clear);
        assert_eq!(snapshot.precipitation_mm, 0.0);
        assert!(!snapshot.is_raining());
    }

    #[test]
    fn converts_owm_response_with_empty_weather_array() {
        let data = OWMCurrentResponse {
            weather: vec![],
            main: OWMMain {
                temp: 19.0,
                humidity: 70,
            },
            rain: None,
        };

        let snapshot = convert_owm_response(data);
        assert_eq!(snapshot.condition, WeatherCondition::Clear);
        assert_eq!(snapshot.description, "");
        assert!(!snapshot.is_raining());
    }

    #[test]
    fn converts_open_meteo_rain_response() {
        let data = OpenMeteoResponse {
            current: OpenMeteoCurrent {
                temperature_2m: 18.4,
                relative_humidity_2m: 88.0,
                precipitation: 1.2,
                weather_code: 63,
            },
        };

        let snapshot = convert_open_meteo_response(data);
        assert_eq!(snapshot.temperature_celsius, 18);
        assert_eq!(snapshot.humidity_percent, 88);
        assert_eq!(snapshot.condition, WeatherCondition::Rain);
        assert_eq!(snapshot.description, "rain");
        assert!(snapshot.is_raining());
    }

    #[test]
    fn maps_wmo_codes_to_conditions() {
        assert_eq!(wmo_condition(0).0, WeatherCondition::Clear);
        assert_eq!(wmo_condition(2).0, WeatherCondition::Clouds);
        assert_eq!(wmo_condition(53).0, WeatherCondition::Rain);
        assert_eq!(wmo_condition(65).0, WeatherCondition::Rain);
        assert_eq!(wmo_condition(75).0, WeatherCondition::Clouds);
        assert_eq!(wmo_condition(81).0, WeatherCondition::Rain);
        assert_eq!(wmo_condition(96).0, WeatherCondition::Thunderstorm);
        // Unknown codes fall back to clear
        assert_eq!(wmo_condition(42).0, WeatherCondition::Clear);
    }

    #[test]
    fn snow_is_not_reported_as_rain_condition() {
        let (condition, description) = wmo_condition(73);
        assert_eq!(condition, WeatherCondition::Clouds);
        assert_eq!(description, "snow");
    }
}

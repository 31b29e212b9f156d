//! Weather data models and the rain predicate

use serde::{Deserialize, Serialize};

/// Coarse weather condition category
///
/// Providers report many more states than these; anything outside the four
/// categories is folded into `Clear` and the free-text description keeps
/// the original wording.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
}

impl WeatherCondition {
    /// Map a provider's condition string onto the category set
    pub fn from_provider(raw: &str) -> Self {
        match raw {
            "Clouds" => WeatherCondition::Clouds,
            "Rain" => WeatherCondition::Rain,
            "Thunderstorm" => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Clear,
        }
    }
}

/// A point-in-time weather observation
///
/// No history is retained; callers hold at most the latest snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in whole degrees Celsius
    pub temperature_celsius: i32,
    pub humidity_percent: i32,
    pub condition: WeatherCondition,
    /// Provider's free-text description, e.g. "light rain"
    pub description: String,
    /// Precipitation over the last hour in millimeters, never negative
    pub precipitation_mm: f64,
}

impl WeatherSnapshot {
    /// Observation used when every upstream provider is unreachable
    pub fn fallback() -> Self {
        Self {
            temperature_celsius: 22,
            humidity_percent: 60,
            condition: WeatherCondition::Clear,
            description: "clear sky".to_string(),
            precipitation_mm: 0.0,
        }
    }

    /// Rain classifier shared by the alert scheduler and display logic.
    ///
    /// Deliberately an OR of three independent signals because upstream
    /// providers disagree on which field they populate: the condition
    /// category, a "rain" substring in the description (case-insensitive),
    /// or any measured precipitation.
    pub fn is_raining(&self) -> bool {
        self.condition == WeatherCondition::Rain
            || self.description.to_lowercase().contains("rain")
            || self.precipitation_mm > 0.0
    }
}

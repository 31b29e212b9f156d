//! Prayer times API client
//!
//! Integrates with the Aladhan API for daily prayer schedules

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::models::PrayerSchedule;

/// Aladhan API client
#[derive(Clone)]
pub struct PrayerTimesClient {
    client: Client,
    base_url: String,
    method: u8,
}

/// Aladhan API response for daily timings
#[derive(Debug, Deserialize)]
struct AladhanResponse {
    data: AladhanData,
}

#[derive(Debug, Deserialize)]
struct AladhanData {
    timings: AladhanTimings,
    date: AladhanDate,
}

#[derive(Debug, Deserialize)]
struct AladhanTimings {
    #[serde(rename = "Fajr")]
    fajr: String,
    #[serde(rename = "Sunrise")]
    sunrise: String,
    #[serde(rename = "Dhuhr")]
    dhuhr: String,
    #[serde(rename = "Asr")]
    asr: String,
    #[serde(rename = "Maghrib")]
    maghrib: String,
    #[serde(rename = "Isha")]
    isha: String,
}

#[derive(Debug, Deserialize)]
struct AladhanDate {
    readable: String,
}

impl PrayerTimesClient {
    /// Create a new PrayerTimesClient
    pub fn new(method: u8) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://api.aladhan.com/v1".to_string(),
            method,
        }
    }

    /// Create a new PrayerTimesClient with custom base URL (for testing)
    pub fn with_base_url(method: u8, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            method,
        }
    }

    /// Fetch the prayer schedule for the day containing the given Unix timestamp
    pub async fn get_timings(
        &self,
        timestamp: i64,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<PrayerSchedule> {
        let url = format!(
            "{}/timings/{}?latitude={}&longitude={}&method={}",
            self.base_url, timestamp, latitude, longitude, self.method
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalService(format!("Prayer times request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Prayer times API error: {} - {}",
                status, body
            )));
        }

        let data: AladhanResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse prayer times response: {}", e))
        })?;

        Ok(convert_timings_response(data))
    }
}

/// Convert an Aladhan timings response to our format
fn convert_timings_response(data: AladhanResponse) -> PrayerSchedule {
    let timings = data.data.timings;

    PrayerSchedule {
        fajr: strip_timezone_suffix(&timings.fajr),
        sunrise: strip_timezone_suffix(&timings.sunrise),
        dhuhr: strip_timezone_suffix(&timings.dhuhr),
        asr: strip_timezone_suffix(&timings.asr),
        maghrib: strip_timezone_suffix(&timings.maghrib),
        isha: strip_timezone_suffix(&timings.isha),
        date: data.data.date.readable,
    }
}

/// Aladhan returns times as "HH:MM" or "HH:MM (TZ)", keep only the clock part
fn strip_timezone_suffix(raw: &str) -> String {
    raw.split(' ').next().unwrap_or(raw).to_string()
}

//! Prayer times service
//!
//! Wraps the Aladhan client and falls back to a fixed approximate schedule
//! when the API is unreachable

use chrono::{Local, Utc};

use crate::config::Config;
use crate::error::AppResult;
use crate::external::prayer::PrayerTimesClient;
use shared::models::PrayerSchedule;

/// Prayer times service
#[derive(Clone)]
pub struct PrayerTimesService {
    client: PrayerTimesClient,
}

impl PrayerTimesService {
    /// Create a new PrayerTimesService
    pub fn new(client: PrayerTimesClient) -> Self {
        Self { client }
    }

    /// Create a PrayerTimesService from application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(PrayerTimesClient::with_base_url(
            config.prayer.method,
            config.prayer.base_url.clone(),
        ))
    }

    /// Today's schedule, or the fixed fallback when the API is unreachable
    pub async fn current_schedule(&self, latitude: f64, longitude: f64) -> PrayerSchedule {
        match self.try_current_schedule(latitude, longitude).await {
            Ok(schedule) => schedule,
            Err(e) => {
                tracing::warn!("Prayer times fetch failed, using fallback schedule: {}", e);
                PrayerSchedule::fallback(today_readable())
            }
        }
    }

    /// Today's schedule from the Aladhan API, erroring on any failure so
    /// callers can decide whether the result is worth caching
    pub async fn try_current_schedule(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<PrayerSchedule> {
        self.client
            .get_timings(Utc::now().timestamp(), latitude, longitude)
            .await
    }
}

/// Today's date in the readable format the Aladhan API uses
pub fn today_readable() -> String {
    Local::now().format("%d %b %Y").to_string()
}

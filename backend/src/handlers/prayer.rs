//! HTTP handlers for prayer times endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::PrayerTimesService;
use crate::AppState;
use shared::models::{minutes_until, PrayerName, PrayerSchedule, TimeRemaining};
use shared::types::Coordinates;
use shared::validation::validate_coordinates;

/// Query parameters identifying a point on the map
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Daily schedule with a countdown to the next prayer
#[derive(Debug, Serialize)]
pub struct PrayerTimesResponse {
    pub schedule: PrayerSchedule,
    pub next_prayer: Option<NextPrayer>,
    pub time_to_maghrib: Option<TimeRemaining>,
}

/// The upcoming prayer and how far away it is
#[derive(Debug, Serialize)]
pub struct NextPrayer {
    pub name: PrayerName,
    pub label: String,
    pub time: String,
    pub remaining: TimeRemaining,
}

/// Get today's prayer schedule for the given coordinates
pub async fn get_prayer_times(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<PrayerTimesResponse>> {
    validate_coordinates(&Coordinates::new(query.latitude, query.longitude))
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = PrayerTimesService::from_config(&state.config);
    let schedule = service
        .current_schedule(query.latitude, query.longitude)
        .await;

    let now = Local::now().naive_local();
    let next_prayer = schedule.next_prayer(now.time()).and_then(|(name, time)| {
        let remaining = TimeRemaining::from_total_minutes(minutes_until(time, now))?;
        Some(NextPrayer {
            name,
            label: name.label().to_string(),
            time: time.format("%H:%M").to_string(),
            remaining,
        })
    });
    // The sunset countdown is reported separately; None once Maghrib has
    // passed for the day
    let time_to_maghrib = schedule
        .maghrib_time()
        .and_then(|time| TimeRemaining::from_total_minutes(minutes_until(time, now)));

    Ok(Json(PrayerTimesResponse {
        schedule,
        next_prayer,
        time_to_maghrib,
    }))
}

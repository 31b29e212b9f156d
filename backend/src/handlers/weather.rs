//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::WeatherService;
use crate::AppState;
use shared::models::WeatherSnapshot;
use shared::types::Coordinates;
use shared::validation::validate_coordinates;

/// Query parameters identifying a point on the map
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions with the derived rain flag
#[derive(Debug, Serialize)]
pub struct CurrentWeatherResponse {
    pub weather: WeatherSnapshot,
    pub is_raining: bool,
}

/// Get current weather conditions for the given coordinates
pub async fn get_current_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<CurrentWeatherResponse>> {
    validate_coordinates(&Coordinates::new(query.latitude, query.longitude))
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = WeatherService::from_config(&state.config);
    let weather = service
        .current_snapshot(query.latitude, query.longitude)
        .await;
    let is_raining = weather.is_raining();

    Ok(Json(CurrentWeatherResponse {
        weather,
        is_raining,
    }))
}

//! HTTP handlers for location endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::LocationService;
use crate::AppState;
use shared::models::ResolvedLocation;
use shared::types::Coordinates;
use shared::validation::validate_coordinates;

/// Query parameters identifying a point on the map
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolve coordinates to a named location
pub async fn resolve_location(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<ResolvedLocation>> {
    validate_coordinates(&Coordinates::new(query.latitude, query.longitude))
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = LocationService::from_config(&state.config);
    let location = service.resolve(query.latitude, query.longitude).await;
    Ok(Json(location))
}

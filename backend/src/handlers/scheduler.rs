//! HTTP handlers for scheduler lifecycle endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::SchedulerHandle;
use crate::AppState;
use shared::types::Coordinates;
use shared::validation::validate_coordinates;

/// Request body for starting an alert session
#[derive(Debug, Deserialize)]
pub struct StartSchedulerRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Scheduler session status
#[derive(Debug, Serialize)]
pub struct SchedulerStatusResponse {
    pub running: bool,
    pub session_id: Option<Uuid>,
    pub city: Option<String>,
    pub maghrib: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl SchedulerStatusResponse {
    fn idle() -> Self {
        Self {
            running: false,
            session_id: None,
            city: None,
            maghrib: None,
            started_at: None,
        }
    }

    fn running(handle: &SchedulerHandle) -> Self {
        Self {
            running: true,
            session_id: Some(handle.id()),
            city: Some(handle.city().to_string()),
            maghrib: Some(handle.maghrib().to_string()),
            started_at: Some(handle.started_at()),
        }
    }
}

/// Start an alert session for the given coordinates, replacing any
/// session already running
pub async fn start_scheduler(
    State(state): State<AppState>,
    Json(request): Json<StartSchedulerRequest>,
) -> AppResult<Json<SchedulerStatusResponse>> {
    validate_coordinates(&Coordinates::new(request.latitude, request.longitude))
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let handle = state
        .scheduler
        .start(request.latitude, request.longitude)
        .await;

    Ok(Json(SchedulerStatusResponse::running(&handle)))
}

/// Stop the active alert session
pub async fn stop_scheduler(
    State(state): State<AppState>,
) -> AppResult<Json<StopSchedulerResponse>> {
    let stopped = state.scheduler.stop().await;
    Ok(Json(StopSchedulerResponse { stopped }))
}

/// Stop response
#[derive(Debug, serde::Serialize)]
pub struct StopSchedulerResponse {
    pub stopped: bool,
}

/// Get the scheduler session status
pub async fn get_scheduler_status(
    State(state): State<AppState>,
) -> AppResult<Json<SchedulerStatusResponse>> {
    let response = match state.scheduler.status().await {
        Some(handle) => SchedulerStatusResponse::running(&handle),
        None => SchedulerStatusResponse::idle(),
    };
    Ok(Json(response))
}

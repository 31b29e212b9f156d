//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use shared::models::NotificationChannel;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub scheduler: String,
    pub channel: NotificationChannel,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Report whether an alert session is currently polling
    let scheduler_status = match state.scheduler.active_session().await {
        Some(_) => "running".to_string(),
        None => "idle".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        scheduler: scheduler_status,
        channel: state.notifier.channel(),
    })
}

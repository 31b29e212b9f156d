//! Route definitions for Maghrib Companion

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Location resolution
        .route("/location/resolve", get(handlers::resolve_location))
        // Prayer times
        .route("/prayer-times", get(handlers::get_prayer_times))
        // Current weather
        .route("/weather/current", get(handlers::get_current_weather))
        // Alert settings
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        // Notification feed
        .nest("/notifications", notification_routes())
        // Scheduler lifecycle
        .nest("/scheduler", scheduler_routes())
}

/// Notification feed routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_notifications))
        .route("/unread-count", get(handlers::get_unread_count))
        .route("/mark-all-read", post(handlers::mark_all_as_read))
        .route("/:notification_id/read", post(handlers::mark_as_read))
}

/// Scheduler lifecycle routes
fn scheduler_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_scheduler_status))
        .route("/start", post(handlers::start_scheduler))
        .route("/stop", post(handlers::stop_scheduler))
}

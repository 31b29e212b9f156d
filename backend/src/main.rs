//! Maghrib Companion - Backend Server
//!
//! Prayer proximity and rain alert service with a REST API for prayer
//! schedules, current weather, alert settings and the notification feed.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared::types::Coordinates;
use shared::validation::validate_coordinates;

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use services::{
    AlertScheduler, LocationService, NotificationService, PrayerTimesService, PushClient,
    SettingsStore, WeatherService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: NotificationService,
    pub scheduler: AlertScheduler,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maghrib_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Maghrib Companion Server");
    tracing::info!("Environment: {}", config.environment);

    // Wire up the settings store, notifier and scheduler
    let store = SettingsStore::new(config.storage.settings_path.clone());
    let notifier = NotificationService::new(store.clone(), PushClient::from_config(&config.push));
    tracing::info!("Notification channel: {:?}", notifier.channel());

    let scheduler = AlertScheduler::new(
        store,
        LocationService::from_config(&config),
        PrayerTimesService::from_config(&config),
        WeatherService::from_config(&config),
        Arc::new(notifier.clone()),
    );

    if config.scheduler.auto_start {
        let latitude = config.scheduler.latitude;
        let longitude = config.scheduler.longitude;
        match validate_coordinates(&Coordinates::new(latitude, longitude)) {
            Ok(()) => {
                let session = scheduler.start(latitude, longitude).await;
                tracing::info!("Alert scheduler auto-started (session {})", session.id());
            }
            Err(e) => {
                tracing::warn!("Scheduler auto-start skipped, invalid coordinates: {}", e);
            }
        }
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        notifier,
        scheduler,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Maghrib Companion API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::config::{
        GeocodingConfig, PrayerApiConfig, PushConfig, SchedulerConfig, ServerConfig,
        StorageConfig, WeatherApiConfig,
    };

    fn test_config(dir: &tempfile::TempDir) -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            geocoding: GeocodingConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                user_agent: "MaghribPrayerApp/1.0".to_string(),
            },
            prayer: PrayerApiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                method: 2,
            },
            weather: WeatherApiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                fallback_base_url: "http://127.0.0.1:9".to_string(),
                api_key: String::new(),
            },
            push: PushConfig {
                endpoint: String::new(),
            },
            storage: StorageConfig {
                settings_path: dir.path().join("settings.json").to_string_lossy().into_owned(),
            },
            scheduler: SchedulerConfig {
                auto_start: false,
                latitude: 21.4225,
                longitude: 39.8262,
            },
        }
    }

    fn test_app(dir: &tempfile::TempDir) -> Router {
        let config = test_config(dir);
        let store = SettingsStore::new(config.storage.settings_path.clone());
        let notifier = NotificationService::new(store.clone(), None);
        let scheduler = AlertScheduler::new(
            store,
            LocationService::from_config(&config),
            PrayerTimesService::from_config(&config),
            WeatherService::from_config(&config),
            Arc::new(notifier.clone()),
        );
        create_app(AppState {
            config: Arc::new(config),
            notifier,
            scheduler,
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_greets() {
        let dir = tempdir().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Maghrib Companion API v1.0");
    }

    #[tokio::test]
    async fn api_health_reports_idle_scheduler() {
        let dir = tempdir().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["scheduler"], "idle");
        // No push endpoint configured, so delivery falls back to the feed
        assert_eq!(json["channel"], "in_app");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let dir = tempdir().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_out_of_range_coordinates() {
        let dir = tempdir().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/location/resolve?latitude=123.0&longitude=0.0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["error"]["message_ar"].is_string());
    }

    #[tokio::test]
    async fn settings_round_trip_with_validation() {
        let dir = tempdir().unwrap();
        let app = test_app(&dir);

        // Defaults before any write
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["alert_lead_minutes"], 15);

        // An unsupported lead time is rejected with a field error
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/settings")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"alert_lead_minutes":25}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["field"], "alert_lead_minutes");

        // A supported one is merged and persisted
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/settings")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"alert_lead_minutes":30,"sound_enabled":false}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["alert_lead_minutes"], 30);
        assert_eq!(json["sound_enabled"], false);
        assert_eq!(json["maghrib_alert_enabled"], true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/settings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["alert_lead_minutes"], 30);
    }

    #[tokio::test]
    async fn scheduler_lifecycle_over_http() {
        let dir = tempdir().unwrap();
        let app = test_app(&dir);

        // Idle at boot
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/scheduler")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["running"], false);

        // Start
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/scheduler/start")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"latitude":21.4225,"longitude":39.8262}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["running"], true);
        assert!(json["session_id"].is_string());
        // The stub endpoints are unreachable, so the session is described
        // by the fallback city and schedule
        assert_eq!(json["city"], "Unknown City");
        assert_eq!(json["maghrib"], "18:30");

        // Status reflects the running session
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/scheduler")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["running"], true);
        assert!(json["started_at"].is_string());

        // Stop twice; the second is a no-op
        let stop = |app: Router| async move {
            let response = app
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/scheduler/stop")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            body_json(response).await
        };
        assert_eq!(stop(app.clone()).await["stopped"], true);
        assert_eq!(stop(app).await["stopped"], false);
    }

    #[tokio::test]
    async fn scheduler_start_rejects_bad_coordinates() {
        let dir = tempdir().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/scheduler/start")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"latitude":-91.0,"longitude":0.0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

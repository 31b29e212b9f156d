//! HTTP handlers for alert settings endpoints

use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::services::SettingsStore;
use crate::AppState;
use shared::models::{AlertSettings, UpdateSettingsInput};
use shared::validation::validate_alert_lead_minutes;

/// Get the persisted alert settings
pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<AlertSettings>> {
    let store = SettingsStore::new(state.config.storage.settings_path.clone());
    Ok(Json(store.load_settings()))
}

/// Update alert settings; absent fields keep their stored value
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<UpdateSettingsInput>,
) -> AppResult<Json<AlertSettings>> {
    if let Some(minutes) = input.alert_lead_minutes {
        validate_alert_lead_minutes(minutes).map_err(|e| AppError::Validation {
            field: "alert_lead_minutes".to_string(),
            message: e.to_string(),
            message_ar: "مدة التنبيه يجب أن تكون 5 أو 10 أو 15 أو 20 أو 30 أو 45 دقيقة"
                .to_string(),
        })?;
    }

    let store = SettingsStore::new(state.config.storage.settings_path.clone());
    let settings = store.save_settings(&input)?;
    Ok(Json(settings))
}

//! HTTP handlers for the in-app notification feed

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;
use shared::models::InAppNotification;

/// Query parameters for listing notifications
#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    pub unread_only: Option<bool>,
    pub limit: Option<usize>,
}

/// Get the in-app notification feed, newest first
pub async fn get_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> AppResult<Json<Vec<InAppNotification>>> {
    let unread_only = query.unread_only.unwrap_or(false);

    let mut notifications = state.notifier.recent().await;
    if unread_only {
        notifications.retain(|n| !n.is_read);
    }
    if let Some(limit) = query.limit {
        notifications.truncate(limit);
    }
    Ok(Json(notifications))
}

/// Get unread notification count
pub async fn get_unread_count(
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = state.notifier.unread_count().await;
    Ok(Json(UnreadCountResponse { count }))
}

/// Unread count response
#[derive(Debug, serde::Serialize)]
pub struct UnreadCountResponse {
    pub count: usize,
}

/// Mark a notification as read
pub async fn mark_as_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> AppResult<Json<InAppNotification>> {
    let notification = state.notifier.mark_read(notification_id).await?;
    Ok(Json(notification))
}

/// Mark all notifications as read
pub async fn mark_all_as_read(
    State(state): State<AppState>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let count = state.notifier.mark_all_read().await;
    Ok(Json(MarkAllReadResponse {
        marked_count: count,
    }))
}

/// Mark all read response
#[derive(Debug, serde::Serialize)]
pub struct MarkAllReadResponse {
    pub marked_count: usize,
}

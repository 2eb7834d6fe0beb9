//! Toast feed endpoints.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::Notification;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Dismissed {
    pub cleared: usize,
}

/// GET /api/notifications - Recent notifications, oldest first.
pub async fn list_notifications(State(state): State<AppState>) -> ApiResult<Vec<Notification>> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);
    success(state.notifications.recent(), revision_id)
}

/// DELETE /api/notifications - Dismiss every notification.
pub async fn clear_notifications(State(state): State<AppState>) -> ApiResult<Dismissed> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);
    let cleared = state.notifications.clear();
    success(Dismissed { cleared }, revision_id)
}

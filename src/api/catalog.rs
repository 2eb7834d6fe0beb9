//! Catalog revision endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::RevisionInfo;
use crate::AppState;

/// GET /api/catalog/revision - Get the current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_info = state.catalog.revision_info().await.map_err(|e| {
        crate::errors::AppErrorWithRevision {
            error: e.into(),
            revision_id: 0,
        }
    })?;

    success(revision_info.clone(), revision_info.revision_id)
}

//! Provider-side service catalog endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{
    category_listing, error, listing, parse_category, success, ApiResult, ListQuery,
    ServiceListing,
};
use crate::errors::AppError;
use crate::form::{FieldUpdate, SaveOutcome, ServiceForm};
use crate::models::{DeleteOutcome, Service, ServiceDraft};
use crate::AppState;

/// GET /api/provider/services - List the catalog.
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ServiceListing> {
    listing(&state, &query).await
}

/// GET /api/provider/services/:category - List one category.
pub async fn list_category_services(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Vec<Service>> {
    category_listing(&state, &category).await
}

/// POST /api/provider/services/:category - Add a service.
pub async fn create_service(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(draft): Json<ServiceDraft>,
) -> ApiResult<Service> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    let category = match parse_category(&category) {
        Ok(category) => category,
        Err(e) => return error(e, revision_id),
    };

    let mut form = ServiceForm::add(category);
    for update in FieldUpdate::from_draft(draft) {
        form.apply(update);
    }

    match form.save(&state.catalog).await {
        Ok(SaveOutcome::Added(service)) => {
            let new_revision = state.catalog.revision_id().await.unwrap_or(revision_id);
            success(service, new_revision)
        }
        Ok(other) => error(
            AppError::Internal(format!("Unexpected save outcome: {:?}", other)),
            revision_id,
        ),
        Err(e) => error(e.into(), revision_id),
    }
}

/// PUT /api/provider/services/:category/:id - Replace a service in place.
pub async fn update_service(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i64)>,
    Json(record): Json<ServiceDraft>,
) -> ApiResult<Service> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    let category = match parse_category(&category) {
        Ok(category) => category,
        Err(e) => return error(e, revision_id),
    };

    let form = ServiceForm::edit(category, record.into_service(id));

    match form.save(&state.catalog).await {
        Ok(SaveOutcome::Updated(service)) => {
            let new_revision = state.catalog.revision_id().await.unwrap_or(revision_id);
            success(service, new_revision)
        }
        Ok(SaveOutcome::NothingStaged) => error(
            AppError::NotFound(format!("Service {} not found in {}", id, category)),
            revision_id,
        ),
        Ok(other) => error(
            AppError::Internal(format!("Unexpected save outcome: {:?}", other)),
            revision_id,
        ),
        Err(e) => error(e.into(), revision_id),
    }
}

/// DELETE /api/provider/services/:category/:id - Remove a service.
pub async fn delete_service(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i64)>,
) -> ApiResult<DeleteOutcome> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    let category = match parse_category(&category) {
        Ok(category) => category,
        Err(e) => return error(e, revision_id),
    };

    match state.catalog.delete_service(category, id).await {
        Ok(removed) => {
            let new_revision = state.catalog.revision_id().await.unwrap_or(revision_id);
            success(DeleteOutcome { removed }, new_revision)
        }
        Err(e) => error(e.into(), revision_id),
    }
}

//! Client-side endpoints: the read-only catalog view and service requests.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::{category_listing, error, listing, success, ApiResult, ListQuery, ServiceListing};
use crate::errors::AppError;
use crate::models::{AddFilesBody, Confirmation, DialogView, OpenRequestBody, Service};
use crate::AppState;

/// GET /api/client/services - Read view of the catalog.
pub async fn list_client_services(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ServiceListing> {
    listing(&state, &query).await
}

/// GET /api/client/services/:category - Read view of one category.
pub async fn list_client_category_services(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Vec<Service>> {
    category_listing(&state, &category).await
}

/// POST /api/client/requests - Open a request dialog for a service.
pub async fn open_request(
    State(state): State<AppState>,
    Json(body): Json<OpenRequestBody>,
) -> ApiResult<DialogView> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    let service = match state.catalog.find(body.service_id).await {
        Ok(Some((_, service))) => service,
        Ok(None) => {
            return error(
                AppError::NotFound(format!("Service {} not found", body.service_id)),
                revision_id,
            )
        }
        Err(e) => return error(e.into(), revision_id),
    };

    // A client-supplied title is kept as the request's snapshot.
    let title = body
        .service_title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(service.title);

    let view = state.requests.open(body.service_id, title).await;
    success(view, revision_id)
}

/// GET /api/client/requests/:id - Current state of a request dialog.
pub async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> ApiResult<DialogView> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    match state.requests.view(request_id).await {
        Ok(view) => success(view, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// POST /api/client/requests/:id/files - Stage documents on a request.
pub async fn add_request_files(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<AddFilesBody>,
) -> ApiResult<DialogView> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    match state.requests.add_files(request_id, body.files).await {
        Ok(view) => success(view, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// DELETE /api/client/requests/:id/files/:index - Unstage one document.
pub async fn remove_request_file(
    State(state): State<AppState>,
    Path((request_id, index)): Path<(Uuid, usize)>,
) -> ApiResult<DialogView> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    match state.requests.remove_file(request_id, index).await {
        Ok(view) => success(view, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// POST /api/client/requests/:id/submit - Submit and wait for confirmation.
pub async fn submit_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> ApiResult<Confirmation> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    match state.requests.submit(request_id).await {
        Ok(confirmation) => success(confirmation, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// DELETE /api/client/requests/:id - Cancel a request dialog.
pub async fn cancel_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> ApiResult<()> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    match state.requests.cancel(request_id).await {
        Ok(()) => success((), revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

//! REST API module.
//!
//! Provider routes manage the catalog; client routes read it and drive service requests.

mod catalog;
mod client;
mod notifications;
mod services;

pub use catalog::*;
pub use client::*;
pub use notifications::*;
pub use services::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{CatalogSnapshot, Category, Service};
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    Err(crate::errors::AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Query parameters shared by the catalog listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Return one flat list instead of category groups.
    #[serde(default)]
    pub flat: bool,
}

/// Catalog listing in either shape.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ServiceListing {
    Grouped(CatalogSnapshot),
    Flat(Vec<Service>),
}

/// Parse a category path segment.
fn parse_category(raw: &str) -> Result<Category, AppError> {
    raw.parse::<Category>().map_err(AppError::from)
}

/// Shared body of the provider and client listing endpoints.
async fn listing(state: &AppState, query: &ListQuery) -> ApiResult<ServiceListing> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    let result = if query.flat {
        state.catalog.list_all().await.map(ServiceListing::Flat)
    } else {
        state.catalog.snapshot().await.map(ServiceListing::Grouped)
    };

    match result {
        Ok(listing) => success(listing, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

/// Shared body of the single-category listing endpoints.
async fn category_listing(state: &AppState, category: &str) -> ApiResult<Vec<Service>> {
    let revision_id = state.catalog.revision_id().await.unwrap_or(0);

    let category = match parse_category(category) {
        Ok(category) => category,
        Err(e) => return error(e, revision_id),
    };

    match state.catalog.list_by_category(category).await {
        Ok(services) => success(services, revision_id),
        Err(e) => error(e.into(), revision_id),
    }
}

//! Error handling module for the practice services backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::UnknownCategory;
use crate::request::{DeskError, RequestError};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Failures raised by the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Required draft fields were blank; nothing was written.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),
    /// Validation error
    #[error("{message}")]
    Validation {
        message: String,
        missing_fields: Vec<String>,
    },
    /// Operation not allowed in the current state
    #[error("{0}")]
    Conflict(String),
    /// Database error
    #[error("{0}")]
    Database(String),
    /// Request submission failed downstream
    #[error("{0}")]
    Upstream(String),
    /// Internal server error
    #[error("{0}")]
    Internal(String),
    /// Bad request
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation { .. } => codes::VALIDATION_ERROR,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Upstream(_) => codes::UPSTREAM_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MissingFields(fields) => AppError::Validation {
                message: "Please fill in all required fields".to_string(),
                missing_fields: fields.into_iter().map(str::to_string).collect(),
            },
            CatalogError::Database(e) => e.into(),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotOpen | RequestError::AlreadySubmitting => {
                AppError::Conflict(err.to_string())
            }
            RequestError::FileIndexOutOfRange { .. } => AppError::BadRequest(err.to_string()),
            RequestError::Rejected(_) | RequestError::Unavailable(_) => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        match err {
            DeskError::UnknownRequest(_) => AppError::NotFound(err.to_string()),
            DeskError::Request(e) => e.into(),
            DeskError::Interrupted(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<UnknownCategory> for AppError {
    fn from(err: UnknownCategory) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub revision_id: i64,
}

impl ErrorResponse {
    pub fn new(error: &AppError, revision_id: i64) -> Self {
        let details = match error {
            AppError::Validation { missing_fields, .. } if !missing_fields.is_empty() => {
                Some(serde_json::json!({ "missingFields": missing_fields }))
            }
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.to_string(),
                details,
            },
            revision_id,
        }
    }
}

/// Wrapper type for errors that carry revision_id context.
#[derive(Debug)]
pub struct AppErrorWithRevision {
    pub error: AppError,
    pub revision_id: i64,
}

impl IntoResponse for AppErrorWithRevision {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = ErrorResponse::new(&self.error, self.revision_id);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_become_validation_details() {
        let err: AppError = CatalogError::MissingFields(vec!["title", "price"]).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = ErrorResponse::new(&err, 3);
        assert_eq!(body.error.code, codes::VALIDATION_ERROR);
        assert_eq!(
            body.error.details,
            Some(serde_json::json!({ "missingFields": ["title", "price"] }))
        );
        assert_eq!(body.revision_id, 3);
    }

    #[test]
    fn test_request_errors_map_to_status() {
        let busy: AppError = RequestError::AlreadySubmitting.into();
        assert_eq!(busy.status_code(), StatusCode::CONFLICT);

        let index: AppError = RequestError::FileIndexOutOfRange { index: 4, len: 1 }.into();
        assert_eq!(index.error_code(), codes::BAD_REQUEST);

        let down: AppError = RequestError::Unavailable("timeout".to_string()).into();
        assert_eq!(down.status_code(), StatusCode::BAD_GATEWAY);

        let lost: AppError = DeskError::Interrupted("task panicked".to_string()).into();
        assert_eq!(lost.error_code(), codes::INTERNAL_ERROR);
    }
}

//! Client service request models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request for a cataloged service, snapshotting the service's id and title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub service_id: i64,
    pub service_title: String,
    /// File names only; nothing is uploaded.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Acknowledgement returned once a request has been submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub reference: Uuid,
    pub service_id: i64,
    pub service_title: String,
    pub attachments: usize,
    pub submitted_at: String,
}

/// Request body for opening a request dialog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequestBody {
    pub service_id: i64,
    #[serde(default)]
    pub service_title: Option<String>,
}

/// Request body for staging files on an open dialog.
#[derive(Debug, Clone, Deserialize)]
pub struct AddFilesBody {
    pub files: Vec<String>,
}

/// Externally visible state of a request dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DialogStatus {
    Closed,
    Open,
    Submitting,
    Failed,
}

/// Snapshot of one request dialog for the client portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogView {
    pub request_id: Uuid,
    pub status: DialogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<ServiceRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

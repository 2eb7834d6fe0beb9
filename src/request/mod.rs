//! Client-side service request workflow.
//!
//! A [`RequestDialog`] walks `Closed -> Open -> Submitting -> Closed`. A failed submission
//! lands in `Failed`, keeping the request and its staged files so the client can retry or
//! cancel. Submission itself goes through a [`RequestGateway`].

mod desk;
mod gateway;

pub use desk::{DeskError, RequestDesk};
pub use gateway::{RequestGateway, SimulatedGateway};

use thiserror::Error;

use crate::models::{Confirmation, DialogStatus, Notification, ServiceRequest};
use crate::notifications::NotificationSink;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("no request is open")]
    NotOpen,
    #[error("request is already being submitted")]
    AlreadySubmitting,
    #[error("no staged file at index {index} (have {len})")]
    FileIndexOutOfRange { index: usize, len: usize },
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("request service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DialogState {
    Closed,
    Open(ServiceRequest),
    Submitting(ServiceRequest),
    Failed {
        request: ServiceRequest,
        error: RequestError,
    },
}

/// One request dialog in the client portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDialog {
    state: DialogState,
}

impl Default for RequestDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestDialog {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
        }
    }

    pub fn status(&self) -> DialogStatus {
        match self.state {
            DialogState::Closed => DialogStatus::Closed,
            DialogState::Open(_) => DialogStatus::Open,
            DialogState::Submitting(_) => DialogStatus::Submitting,
            DialogState::Failed { .. } => DialogStatus::Failed,
        }
    }

    /// The request bound to the dialog, if any.
    pub fn request(&self) -> Option<&ServiceRequest> {
        match &self.state {
            DialogState::Closed => None,
            DialogState::Open(request)
            | DialogState::Submitting(request)
            | DialogState::Failed { request, .. } => Some(request),
        }
    }

    pub fn last_error(&self) -> Option<&RequestError> {
        match &self.state {
            DialogState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// A dialog already bound to a service.
    pub fn open(service_id: i64, service_title: impl Into<String>) -> Self {
        Self {
            state: DialogState::Open(ServiceRequest {
                service_id,
                service_title: service_title.into(),
                files: Vec::new(),
            }),
        }
    }

    /// Bind the dialog to a service. Nothing is sent yet.
    pub fn request_service(
        &mut self,
        service_id: i64,
        service_title: impl Into<String>,
    ) -> Result<(), RequestError> {
        if matches!(self.state, DialogState::Submitting(_)) {
            return Err(RequestError::AlreadySubmitting);
        }
        *self = Self::open(service_id, service_title);
        Ok(())
    }

    /// Stage file names; returns the number now staged.
    pub fn add_files<I, S>(&mut self, files: I) -> Result<usize, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = self.editable_request()?;
        request.files.extend(files.into_iter().map(Into::into));
        Ok(request.files.len())
    }

    /// Unstage the file at `index`.
    pub fn remove_file(&mut self, index: usize) -> Result<String, RequestError> {
        let request = self.editable_request()?;
        let len = request.files.len();
        if index >= len {
            return Err(RequestError::FileIndexOutOfRange { index, len });
        }
        Ok(request.files.remove(index))
    }

    /// Move to `Submitting`, returning the request to hand to the gateway.
    pub fn begin_submit(&mut self) -> Result<ServiceRequest, RequestError> {
        let request = match &self.state {
            DialogState::Open(request) | DialogState::Failed { request, .. } => request.clone(),
            DialogState::Submitting(_) => return Err(RequestError::AlreadySubmitting),
            DialogState::Closed => return Err(RequestError::NotOpen),
        };
        self.state = DialogState::Submitting(request.clone());
        Ok(request)
    }

    /// Settle a submission started with [`begin_submit`](Self::begin_submit).
    ///
    /// Success closes the dialog and drops the staged files; failure keeps them.
    /// Exactly one notification is emitted either way.
    pub fn finish_submit(
        &mut self,
        outcome: Result<Confirmation, RequestError>,
        sink: &dyn NotificationSink,
    ) -> Result<Confirmation, RequestError> {
        let request = match std::mem::replace(&mut self.state, DialogState::Closed) {
            DialogState::Submitting(request) => request,
            other => {
                self.state = other;
                return Err(RequestError::NotOpen);
            }
        };

        match outcome {
            Ok(confirmation) => {
                tracing::info!(
                    service_id = confirmation.service_id,
                    reference = %confirmation.reference,
                    "Service request submitted"
                );
                sink.notify(Notification::new(
                    "Request submitted",
                    submitted_description(&confirmation),
                ));
                Ok(confirmation)
            }
            Err(error) => {
                tracing::warn!(service_id = request.service_id, %error, "Service request failed");
                sink.notify(Notification::destructive(
                    "Request failed",
                    format!(
                        "Your request for {} could not be sent: {}",
                        request.service_title, error
                    ),
                ));
                self.state = DialogState::Failed {
                    request,
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }

    /// Submit through `gateway` and wait for the outcome.
    pub async fn submit_request(
        &mut self,
        gateway: &dyn RequestGateway,
        sink: &dyn NotificationSink,
    ) -> Result<Confirmation, RequestError> {
        let request = self.begin_submit()?;
        let outcome = gateway.submit(&request).await;
        self.finish_submit(outcome, sink)
    }

    /// Close the dialog and discard staged files without side effects.
    pub fn cancel(&mut self) -> Result<(), RequestError> {
        if matches!(self.state, DialogState::Submitting(_)) {
            return Err(RequestError::AlreadySubmitting);
        }
        self.state = DialogState::Closed;
        Ok(())
    }

    fn editable_request(&mut self) -> Result<&mut ServiceRequest, RequestError> {
        match &mut self.state {
            DialogState::Open(request) | DialogState::Failed { request, .. } => Ok(request),
            DialogState::Submitting(_) => Err(RequestError::AlreadySubmitting),
            DialogState::Closed => Err(RequestError::NotOpen),
        }
    }
}

fn submitted_description(confirmation: &Confirmation) -> String {
    let mut description = format!(
        "Your request for {} has been sent to the firm.",
        confirmation.service_title
    );
    match confirmation.attachments {
        0 => {}
        1 => description.push_str(" 1 document attached."),
        n => description.push_str(&format!(" {n} documents attached.")),
    }
    description
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::models::Variant;
    use crate::notifications::NotificationCenter;

    /// Gateway that fails a fixed number of times before succeeding.
    struct FlakyGateway {
        failures_left: Mutex<u32>,
        inner: SimulatedGateway,
    }

    #[async_trait]
    impl RequestGateway for FlakyGateway {
        async fn submit(&self, request: &ServiceRequest) -> Result<Confirmation, RequestError> {
            {
                let mut left = self.failures_left.lock().unwrap();
                if *left > 0 {
                    *left -= 1;
                    return Err(RequestError::Unavailable("connection reset".to_string()));
                }
            }
            self.inner.submit(request).await
        }
    }

    fn fast_gateway() -> SimulatedGateway {
        SimulatedGateway::new(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_submit_closes_dialog_and_notifies_once() {
        let center = NotificationCenter::new(8);
        let mut dialog = RequestDialog::new();

        dialog.request_service(1, "Civil Litigation").unwrap();
        assert_eq!(dialog.status(), DialogStatus::Open);

        let confirmation = dialog
            .submit_request(&fast_gateway(), &center)
            .await
            .unwrap();

        assert_eq!(confirmation.service_id, 1);
        assert_eq!(dialog.status(), DialogStatus::Closed);
        assert!(dialog.request().is_none());

        let notices = center.recent();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].description.contains("Civil Litigation"));
        assert_eq!(notices[0].variant, Variant::Default);
    }

    #[tokio::test]
    async fn test_submit_mentions_attached_documents() {
        let center = NotificationCenter::new(8);
        let mut dialog = RequestDialog::new();
        dialog.request_service(4, "Divorce Proceedings").unwrap();
        assert_eq!(dialog.add_files(["a.pdf", "b.pdf", "c.pdf"]).unwrap(), 3);
        assert_eq!(dialog.remove_file(1).unwrap(), "b.pdf");

        let confirmation = dialog
            .submit_request(&fast_gateway(), &center)
            .await
            .unwrap();

        assert_eq!(confirmation.attachments, 2);
        assert!(center.recent()[0].description.contains("2 documents"));
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let mut dialog = RequestDialog::new();
        dialog.request_service(7, "Business Formation").unwrap();
        dialog.add_files(["bylaws.docx"]).unwrap();

        dialog.cancel().unwrap();

        assert_eq!(dialog.status(), DialogStatus::Closed);
        assert_eq!(dialog.add_files(["late.pdf"]), Err(RequestError::NotOpen));
    }

    #[test]
    fn test_submitting_blocks_edits() {
        let mut dialog = RequestDialog::new();
        dialog.request_service(10, "Will Preparation").unwrap();
        dialog.begin_submit().unwrap();

        assert_eq!(dialog.status(), DialogStatus::Submitting);
        assert_eq!(dialog.begin_submit(), Err(RequestError::AlreadySubmitting));
        assert_eq!(dialog.cancel(), Err(RequestError::AlreadySubmitting));
        assert_eq!(dialog.remove_file(0), Err(RequestError::AlreadySubmitting));
        assert_eq!(
            dialog.request_service(11, "Estate Planning"),
            Err(RequestError::AlreadySubmitting)
        );
    }

    #[test]
    fn test_remove_file_out_of_range() {
        let mut dialog = RequestDialog::new();
        dialog.request_service(2, "Personal Injury").unwrap();
        dialog.add_files(["report.pdf"]).unwrap();

        assert_eq!(
            dialog.remove_file(3),
            Err(RequestError::FileIndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_open_constructor_binds_service() {
        let dialog = RequestDialog::open(3, "Labor & Employment");

        assert_eq!(dialog.status(), DialogStatus::Open);
        assert_eq!(dialog.request().unwrap().service_title, "Labor & Employment");
        assert!(dialog.request().unwrap().files.is_empty());
    }

    #[test]
    fn test_submit_without_open_dialog() {
        let mut dialog = RequestDialog::new();
        assert_eq!(dialog.begin_submit(), Err(RequestError::NotOpen));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_files_for_retry() {
        let center = NotificationCenter::new(8);
        let gateway = FlakyGateway {
            failures_left: Mutex::new(1),
            inner: fast_gateway(),
        };
        let mut dialog = RequestDialog::new();
        dialog.request_service(5, "Child Custody").unwrap();
        dialog.add_files(["order.pdf"]).unwrap();

        let err = dialog.submit_request(&gateway, &center).await.unwrap_err();

        assert!(matches!(err, RequestError::Unavailable(_)));
        assert_eq!(dialog.status(), DialogStatus::Failed);
        assert_eq!(dialog.request().unwrap().files, vec!["order.pdf".to_string()]);
        assert_eq!(dialog.last_error(), Some(&err));
        assert_eq!(center.recent()[0].variant, Variant::Destructive);

        let confirmation = dialog.submit_request(&gateway, &center).await.unwrap();

        assert_eq!(confirmation.attachments, 1);
        assert_eq!(dialog.status(), DialogStatus::Closed);
        assert_eq!(center.recent().len(), 2);
    }
}

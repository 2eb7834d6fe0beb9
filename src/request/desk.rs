//! Hosts request dialogs for many clients at once, keyed by request id.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use super::{RequestDialog, RequestError, RequestGateway};
use crate::models::{Confirmation, DialogStatus, DialogView, ServiceRequest};
use crate::notifications::NotificationSink;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("request {0} not found")]
    UnknownRequest(Uuid),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("request submission interrupted: {0}")]
    Interrupted(String),
}

struct Entry {
    dialog: RequestDialog,
    touched_at: Instant,
}

type Dialogs = Arc<RwLock<HashMap<Uuid, Entry>>>;

/// Open request dialogs. A dialog is dropped once it closes or sits idle past the TTL.
pub struct RequestDesk {
    dialogs: Dialogs,
    gateway: Arc<dyn RequestGateway>,
    notifier: Arc<dyn NotificationSink>,
    ttl: Duration,
}

impl RequestDesk {
    pub fn new(
        gateway: Arc<dyn RequestGateway>,
        notifier: Arc<dyn NotificationSink>,
        ttl: Duration,
    ) -> Self {
        Self {
            dialogs: Arc::new(RwLock::new(HashMap::new())),
            gateway,
            notifier,
            ttl,
        }
    }

    /// Open a dialog bound to a service, evicting idle dialogs first.
    pub async fn open(&self, service_id: i64, service_title: String) -> DialogView {
        let request_id = Uuid::new_v4();
        let dialog = RequestDialog::open(service_id, service_title);
        let view = view_of(request_id, &dialog);

        let mut dialogs = self.dialogs.write().await;
        evict_stale(&mut dialogs, self.ttl);
        dialogs.insert(
            request_id,
            Entry {
                dialog,
                touched_at: Instant::now(),
            },
        );
        tracing::debug!(%request_id, service_id, "Opened request dialog");
        view
    }

    pub async fn view(&self, request_id: Uuid) -> Result<DialogView, DeskError> {
        let dialogs = self.dialogs.read().await;
        let entry = dialogs
            .get(&request_id)
            .ok_or(DeskError::UnknownRequest(request_id))?;
        Ok(view_of(request_id, &entry.dialog))
    }

    pub async fn add_files(
        &self,
        request_id: Uuid,
        files: Vec<String>,
    ) -> Result<DialogView, DeskError> {
        let mut dialogs = self.dialogs.write().await;
        let dialog = touch(&mut dialogs, request_id)?;
        dialog.add_files(files)?;
        Ok(view_of(request_id, dialog))
    }

    pub async fn remove_file(
        &self,
        request_id: Uuid,
        index: usize,
    ) -> Result<DialogView, DeskError> {
        let mut dialogs = self.dialogs.write().await;
        let dialog = touch(&mut dialogs, request_id)?;
        dialog.remove_file(index)?;
        Ok(view_of(request_id, dialog))
    }

    /// Submit the dialog's request. The lock is not held while the gateway works.
    ///
    /// The gateway call and settlement run in their own task, so a caller that goes away
    /// mid-submit still leaves the dialog closed or failed.
    pub async fn submit(&self, request_id: Uuid) -> Result<Confirmation, DeskError> {
        let request = {
            let mut dialogs = self.dialogs.write().await;
            touch(&mut dialogs, request_id)?.begin_submit()?
        };

        let task = tokio::spawn(settle(
            self.dialogs.clone(),
            self.gateway.clone(),
            self.notifier.clone(),
            request_id,
            request,
        ));

        task.await.map_err(|e| DeskError::Interrupted(e.to_string()))?
    }

    /// Discard the dialog and its staged files.
    pub async fn cancel(&self, request_id: Uuid) -> Result<(), DeskError> {
        let mut dialogs = self.dialogs.write().await;
        touch(&mut dialogs, request_id)?.cancel()?;
        dialogs.remove(&request_id);
        tracing::debug!(%request_id, "Cancelled request dialog");
        Ok(())
    }

    /// Number of dialogs currently open, submitting or failed.
    pub async fn open_count(&self) -> usize {
        self.dialogs.read().await.len()
    }
}

async fn settle(
    dialogs: Dialogs,
    gateway: Arc<dyn RequestGateway>,
    notifier: Arc<dyn NotificationSink>,
    request_id: Uuid,
    request: ServiceRequest,
) -> Result<Confirmation, DeskError> {
    let outcome = gateway.submit(&request).await;

    let mut dialogs = dialogs.write().await;
    let result = touch(&mut dialogs, request_id)?.finish_submit(outcome, notifier.as_ref());
    if result.is_ok() {
        dialogs.remove(&request_id);
    }
    result.map_err(DeskError::from)
}

fn touch(
    dialogs: &mut HashMap<Uuid, Entry>,
    request_id: Uuid,
) -> Result<&mut RequestDialog, DeskError> {
    let entry = dialogs
        .get_mut(&request_id)
        .ok_or(DeskError::UnknownRequest(request_id))?;
    entry.touched_at = Instant::now();
    Ok(&mut entry.dialog)
}

/// Drop dialogs idle for longer than `ttl`. A dialog mid-submit is never evicted.
fn evict_stale(dialogs: &mut HashMap<Uuid, Entry>, ttl: Duration) {
    let before = dialogs.len();
    dialogs.retain(|_, entry| {
        entry.dialog.status() == DialogStatus::Submitting || entry.touched_at.elapsed() < ttl
    });

    let evicted = before - dialogs.len();
    if evicted > 0 {
        tracing::debug!(evicted, "Evicted idle request dialogs");
    }
}

fn view_of(request_id: Uuid, dialog: &RequestDialog) -> DialogView {
    DialogView {
        request_id,
        status: dialog.status(),
        request: dialog.request().cloned(),
        last_error: dialog.last_error().map(ToString::to_string),
    }
}

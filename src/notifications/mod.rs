//! Notification sink used by the catalog and request workflow.
//!
//! Every user-visible outcome funnels through a [`NotificationSink`].

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::models::{Notification, Variant};

/// Receiver of transient user-facing notices.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Bounded in-memory toast feed.
pub struct NotificationCenter {
    recent: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationCenter {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Notifications currently held, oldest first.
    pub fn recent(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    /// Dismiss everything, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut recent = self.lock();
        let count = recent.len();
        recent.clear();
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        // A poisoned feed still holds valid notifications.
        self.recent.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Default => tracing::info!(
                title = %notification.title,
                "{}",
                notification.description
            ),
            Variant::Destructive => tracing::warn!(
                title = %notification.title,
                "{}",
                notification.description
            ),
        }

        if self.capacity == 0 {
            return;
        }

        let mut recent = self.lock();
        while recent.len() >= self.capacity {
            recent.pop_front();
        }
        recent.push_back(notification);
    }
}

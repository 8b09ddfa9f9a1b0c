//! Notification sinks that keep or log notices instead of showing them.

use std::sync::{Arc, Mutex, PoisonError};

use crate::board::ports::{BoardNotifier, Notification};

/// Notifier that records every notification in delivery order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications delivered so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl BoardNotifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Notifier that writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl BoardNotifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match &notification {
            Notification::Updated { task_id, status } => {
                tracing::info!(%task_id, %status, "{}", notification.message());
            }
            Notification::Failed { task_id, .. } => {
                tracing::warn!(%task_id, "{}", notification.message());
            }
        }
    }
}

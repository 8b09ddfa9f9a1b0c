//! Port for user-facing transition notifications.

use crate::board::domain::TaskId;

/// Notification text for a committed transition.
pub const UPDATED_MESSAGE: &str = "Task updated";

/// Transient notice raised when a transition settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The backend accepted the new status.
    Updated {
        /// Task that moved.
        task_id: TaskId,
        /// Status now persisted.
        status: String,
    },
    /// The backend refused or could not be reached; the move was undone.
    Failed {
        /// Task that was rolled back.
        task_id: TaskId,
        /// Text to show the user.
        message: String,
    },
}

impl Notification {
    /// Returns the task the notification is about.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Updated { task_id, .. } | Self::Failed { task_id, .. } => *task_id,
        }
    }

    /// Returns the text to show the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Updated { .. } => UPDATED_MESSAGE,
            Self::Failed { message, .. } => message,
        }
    }

    /// Returns `true` for failure notices.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Sink for transition notifications.
#[cfg_attr(test, mockall::automock)]
pub trait BoardNotifier: Send + Sync {
    /// Delivers a notification. Delivery must not block.
    fn notify(&self, notification: Notification);
}

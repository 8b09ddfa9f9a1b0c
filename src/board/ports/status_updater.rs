//! Port for persisting a task's status change on the CRM backend.

use crate::board::domain::{CompanyId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Notification text used when a failure carries no backend message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to update status";

/// Result type for status update operations.
pub type StatusUpdateResult<T> = Result<T, StatusUpdateError>;

/// A single status change to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdateRequest {
    /// Task whose status changes.
    pub task_id: TaskId,
    /// New status, normally a canonical column id.
    pub status: String,
    /// Tenant the task belongs to, when the session knows it.
    pub company_id: Option<CompanyId>,
}

impl StatusUpdateRequest {
    /// Creates a request without a tenant identifier.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
            company_id: None,
        }
    }

    /// Sets the tenant identifier.
    #[must_use]
    pub const fn with_company(mut self, company_id: Option<CompanyId>) -> Self {
        self.company_id = company_id;
        self
    }
}

/// Remote status update contract.
#[async_trait]
pub trait TaskStatusUpdater: Send + Sync {
    /// Persists the requested status.
    ///
    /// # Errors
    ///
    /// Returns [`StatusUpdateError`] when the call could not be made, the
    /// backend answered with a failure, or the answer could not be read.
    async fn update_status(&self, request: &StatusUpdateRequest) -> StatusUpdateResult<()>;
}

/// Errors returned by status updater implementations.
#[derive(Debug, Clone, Error)]
pub enum StatusUpdateError {
    /// The request never produced a response.
    #[error("status update transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend reported a failure.
    #[error("status update rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code, when the failure came from one.
        status: Option<u16>,
        /// Human-readable message from the backend, if it sent one.
        message: Option<String>,
    },

    /// The backend answered with a body that could not be interpreted.
    #[error("malformed status update response: {0}")]
    MalformedResponse(String),
}

impl StatusUpdateError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Creates a rejection carrying a backend message.
    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    /// Returns the text to show the user.
    ///
    /// Backend messages are forwarded verbatim; every other failure uses
    /// [`DEFAULT_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => DEFAULT_FAILURE_MESSAGE.to_owned(),
        }
    }
}

//! Port for loading a project's tasks onto a board.

use crate::board::domain::{ProjectId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task source operations.
pub type TaskSourceResult<T> = Result<T, TaskSourceError>;

/// Page to request. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub number: u32,
    /// Maximum number of tasks per page.
    pub size: u32,
}

impl PageRequest {
    /// Requests the first page.
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self { number: 1, size }
    }

    /// Requests the page after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            number: self.number.saturating_add(1),
            size: self.size,
        }
    }
}

/// One page of a project's tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPage {
    /// Tasks on this page, in backend order.
    pub tasks: Vec<TaskRecord>,
    /// Total number of pages.
    pub total_pages: u32,
    /// 1-based number of this page.
    pub current_page: u32,
    /// Total number of tasks across all pages.
    pub total_tasks: u64,
}

/// Source of the tasks shown on a board.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetches one page of a project's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError`] when the tasks cannot be fetched.
    async fn fetch_page(&self, project_id: ProjectId, page: PageRequest)
    -> TaskSourceResult<TaskPage>;

    /// Fetches every page of a project's tasks and concatenates them in order.
    ///
    /// # Errors
    ///
    /// Returns the first page error encountered.
    async fn fetch_all(
        &self,
        project_id: ProjectId,
        page_size: u32,
    ) -> TaskSourceResult<Vec<TaskRecord>> {
        let mut page = PageRequest::first(page_size.max(1));
        let mut tasks = Vec::new();
        loop {
            let fetched = self.fetch_page(project_id, page).await?;
            let was_empty = fetched.tasks.is_empty();
            tasks.extend(fetched.tasks);
            if was_empty || page.number >= fetched.total_pages {
                return Ok(tasks);
            }
            page = page.next();
        }
    }
}

/// Errors returned by task source implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskSourceError {
    /// The backend reported an error.
    #[error("task listing rejected: {message}")]
    Rejected {
        /// Error code reported by the backend, usually an HTTP status.
        code: Option<u16>,
        /// Short error title, if provided.
        title: Option<String>,
        /// Human-readable message.
        message: String,
    },

    /// The request never produced a response.
    #[error("task listing transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a body that could not be interpreted.
    #[error("malformed task listing response: {0}")]
    MalformedResponse(String),
}

impl TaskSourceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

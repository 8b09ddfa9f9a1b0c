//! In-memory task source for board tests and offline sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{ProjectId, TaskRecord},
    ports::{PageRequest, TaskPage, TaskSource, TaskSourceError, TaskSourceResult},
};

/// Thread-safe in-memory task source, paginated like the CRM backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskSource {
    state: Arc<RwLock<InMemorySourceState>>,
}

#[derive(Debug, Default)]
struct InMemorySourceState {
    projects: HashMap<ProjectId, Vec<TaskRecord>>,
    failure: Option<TaskSourceError>,
}

fn lock_error(err: impl ToString) -> TaskSourceError {
    TaskSourceError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskSource {
    /// Creates a source with no projects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tasks of a project, replacing any previous set.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_project_tasks(
        &self,
        project_id: ProjectId,
        tasks: Vec<TaskRecord>,
    ) -> TaskSourceResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.projects.insert(project_id, tasks);
        Ok(())
    }

    /// Makes every subsequent fetch fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_with(&self, error: TaskSourceError) -> TaskSourceResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failure = Some(error);
        Ok(())
    }
}

#[async_trait]
impl TaskSource for InMemoryTaskSource {
    async fn fetch_page(
        &self,
        project_id: ProjectId,
        page: PageRequest,
    ) -> TaskSourceResult<TaskPage> {
        let state = self.state.read().map_err(lock_error)?;
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        let all = state.projects.get(&project_id).map_or(&[][..], Vec::as_slice);
        let size = usize::try_from(page.size.max(1)).unwrap_or(usize::MAX);
        let skip = usize::try_from(page.number.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(size);
        let tasks = all.iter().skip(skip).take(size).cloned().collect();
        let total_pages = all.len().div_ceil(size);

        Ok(TaskPage {
            tasks,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            current_page: page.number,
            total_tasks: u64::try_from(all.len()).unwrap_or(u64::MAX),
        })
    }
}

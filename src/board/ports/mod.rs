//! Port contracts for the kanban board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod notifier;
pub mod status_updater;
pub mod task_source;

pub use notifier::{BoardNotifier, Notification, UPDATED_MESSAGE};
pub use status_updater::{
    DEFAULT_FAILURE_MESSAGE, StatusUpdateError, StatusUpdateRequest, StatusUpdateResult,
    TaskStatusUpdater,
};
pub use task_source::{PageRequest, TaskPage, TaskSource, TaskSourceError, TaskSourceResult};

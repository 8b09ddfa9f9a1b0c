//! In-memory adapters for board ports.

mod notifier;
mod status_updater;
mod task_source;

pub use notifier::{LogNotifier, RecordingNotifier};
pub use status_updater::{HeldResponse, InMemoryStatusUpdater};
pub use task_source::InMemoryTaskSource;

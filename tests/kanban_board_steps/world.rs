//! Shared world state for kanban board BDD scenarios.

use std::sync::Arc;

use crm_board::board::{
    adapters::memory::{HeldResponse, InMemoryStatusUpdater, RecordingNotifier},
    domain::{BoardState, ProjectId, TaskId},
    services::{BoardSession, DragEndOutcome, TransitionOutcome},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Session type used by the BDD world.
pub type TestSession = BoardSession<InMemoryStatusUpdater, RecordingNotifier, DefaultClock>;

/// How the held backend call should resolve.
pub enum PendingAnswer {
    Accept(HeldResponse),
    Refuse(HeldResponse, String),
}

/// Scenario world for kanban board behaviour tests.
pub struct KanbanWorld {
    pub session: TestSession,
    pub updater: Arc<InMemoryStatusUpdater>,
    pub notifier: Arc<RecordingNotifier>,
    pub initial_board: Option<BoardState>,
    pub pending_answer: Option<PendingAnswer>,
    pub last_drag_end: Option<DragEndOutcome>,
    pub last_outcome: Option<TransitionOutcome>,
}

impl KanbanWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let updater = Arc::new(InMemoryStatusUpdater::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = BoardSession::new(
            ProjectId::new(1),
            Arc::clone(&updater),
            Arc::clone(&notifier),
            Arc::new(DefaultClock),
        );

        Self {
            session,
            updater,
            notifier,
            initial_board: None,
            pending_answer: None,
            last_drag_end: None,
            last_outcome: None,
        }
    }

    /// Returns the current status of a task.
    #[must_use]
    pub fn status_of(&self, task_id: u64) -> Option<String> {
        self.session
            .board()
            .read(|board| board.status_of(TaskId::new(task_id)).map(str::to_owned))
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

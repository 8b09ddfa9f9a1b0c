//! One user's board: state, drag controller and transition executor.

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use super::transition::{TransitionExecutor, TransitionOutcome};
use crate::board::{
    domain::{
        BoardColumns, BoardState, CompanyId, DragController, DragResolution, DragState, ProjectId,
        SharedBoard, TaskId, TaskRecord, TransitionId,
    },
    ports::{BoardNotifier, TaskSource, TaskSourceError, TaskStatusUpdater},
};

/// Service-level errors for board sessions.
#[derive(Debug, Error)]
pub enum BoardSessionError {
    /// The task source failed while loading the board.
    #[error(transparent)]
    Source(#[from] TaskSourceError),
    /// A background transition task panicked or was aborted.
    #[error("transition task did not complete: {0}")]
    Join(#[from] JoinError),
}

/// Result type for board session operations.
pub type BoardSessionResult<T> = Result<T, BoardSessionError>;

/// A transition whose remote call runs in the background.
#[derive(Debug)]
pub struct DispatchedTransition {
    /// Transition correlation id.
    pub id: TransitionId,
    /// Task that was moved.
    pub task_id: TaskId,
    /// Status before the move.
    pub from: String,
    /// Status applied optimistically.
    pub to: String,
    handle: JoinHandle<TransitionOutcome>,
}

impl DispatchedTransition {
    /// Waits for the transition to commit or roll back.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Join`] if the background task panicked
    /// or was aborted.
    pub async fn wait(self) -> BoardSessionResult<TransitionOutcome> {
        Ok(self.handle.await?)
    }
}

/// Result of ending a drag.
#[derive(Debug)]
pub enum DragEndOutcome {
    /// No drag was active.
    NotDragging,
    /// The drop target did not resolve; nothing changed.
    Cancelled {
        /// Task that was being dragged.
        task_id: TaskId,
    },
    /// The task was dropped into its own column; nothing changed.
    Unchanged {
        /// Task that was being dragged.
        task_id: TaskId,
    },
    /// The status was applied and the remote call dispatched.
    Dispatched(DispatchedTransition),
}

/// Board of one project for one viewer.
///
/// The session owns the drag controller; the board state is shared only
/// with the session's own in-flight transitions.
pub struct BoardSession<U, N, C>
where
    U: TaskStatusUpdater + 'static,
    N: BoardNotifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    board: SharedBoard,
    drag: DragController,
    executor: TransitionExecutor<U, N, C>,
}

impl<U, N, C> BoardSession<U, N, C>
where
    U: TaskStatusUpdater + 'static,
    N: BoardNotifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty board for `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, updater: Arc<U>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        let board = SharedBoard::new(BoardState::new(project_id));
        let executor = TransitionExecutor::new(board.clone(), updater, notifier, clock);
        Self {
            board,
            drag: DragController::new(),
            executor,
        }
    }

    /// Sets the company forwarded with status updates.
    #[must_use]
    pub fn with_company(self, company_id: Option<CompanyId>) -> Self {
        Self {
            executor: self.executor.with_company(company_id),
            ..self
        }
    }

    /// Returns the shared board.
    #[must_use]
    pub const fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// Returns the drag state.
    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Returns the project shown on this board.
    #[must_use]
    pub fn project_id(&self) -> ProjectId {
        self.board.read(BoardState::project_id)
    }

    /// Replaces every task on the board.
    pub fn load(&self, tasks: Vec<TaskRecord>) {
        self.board.write(|board| board.replace_all(tasks));
    }

    /// Loads every page of the project's tasks from `source`.
    ///
    /// Returns the number of tasks now on the board. On error the board is
    /// left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSessionError::Source`] when a page cannot be fetched.
    #[tracing::instrument(skip(self, source))]
    pub async fn load_from<S>(&self, source: &S, page_size: u32) -> BoardSessionResult<usize>
    where
        S: TaskSource + ?Sized,
    {
        let project_id = self.project_id();
        let tasks = source.fetch_all(project_id, page_size).await?;
        let loaded = tasks.len();
        self.load(tasks);
        tracing::info!(%project_id, tasks = loaded, "board loaded");
        Ok(loaded)
    }

    /// Starts dragging `task_id`.
    ///
    /// Returns `false`, staying idle, when the task is not on the board.
    pub fn drag_start(&mut self, task_id: TaskId) -> bool {
        let started = self
            .board
            .read(|board| self.drag.drag_start(board, task_id));
        if !started {
            tracing::debug!(%task_id, "drag ignored: task not on board");
        }
        started
    }

    /// Abandons the active drag without touching the board.
    pub const fn drag_cancel(&mut self) {
        self.drag.drag_cancel();
    }

    /// Ends the active drag over `over_id`, a column id or a task id.
    ///
    /// A move applies the new status before returning and settles in a
    /// spawned task, so further drags can start immediately.
    ///
    /// # Panics
    ///
    /// Panics if a move is dispatched outside a Tokio runtime.
    pub fn drag_end(&mut self, over_id: Option<&str>) -> DragEndOutcome {
        let resolution = self.board.read(|board| self.drag.drag_end(board, over_id));
        match resolution {
            DragResolution::NotDragging => DragEndOutcome::NotDragging,
            DragResolution::Cancelled { task_id } => {
                tracing::debug!(%task_id, over = ?over_id, "drop target did not resolve");
                DragEndOutcome::Cancelled { task_id }
            }
            DragResolution::Unchanged { task_id } => DragEndOutcome::Unchanged { task_id },
            DragResolution::Move(plan) => {
                let Some(in_flight) = self.executor.begin(plan.task_id, plan.to) else {
                    return DragEndOutcome::Cancelled {
                        task_id: plan.task_id,
                    };
                };
                let id = in_flight.id();
                let to = in_flight.requested_status().to_owned();
                let from = in_flight.previous_status().to_owned();
                let handle = tokio::spawn(in_flight.settle());
                DragEndOutcome::Dispatched(DispatchedTransition {
                    id,
                    task_id: plan.task_id,
                    from,
                    to,
                    handle,
                })
            }
        }
    }

    /// Runs `f` against the current column partition.
    pub fn with_columns<T>(&self, f: impl FnOnce(&BoardColumns<'_>) -> T) -> T {
        self.board.read(|board| f(&board.columns()))
    }

    /// Returns a copy of the board.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.board.snapshot()
    }
}

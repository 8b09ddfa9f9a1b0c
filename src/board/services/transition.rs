//! Optimistic status transitions with exact rollback.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;

use crate::board::{
    domain::{CompanyId, SharedBoard, TaskId, TransitionId},
    ports::{BoardNotifier, Notification, StatusUpdateError, StatusUpdateRequest, TaskStatusUpdater},
};

/// How a transition settled.
#[derive(Debug, Clone)]
pub enum TransitionResult {
    /// The backend accepted the status; the board keeps it.
    Committed,
    /// The backend call failed and the prior status was written back.
    RolledBack {
        /// Failure reported by the updater.
        error: StatusUpdateError,
        /// `false` when the task had left the board before the rollback.
        restored: bool,
    },
}

/// Record of a settled transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// Correlation id shared with the transition's log events.
    pub id: TransitionId,
    /// Task that was moved.
    pub task_id: TaskId,
    /// Status captured immediately before the optimistic update.
    pub previous_status: String,
    /// Status that was requested.
    pub requested_status: String,
    /// Commit or rollback.
    pub result: TransitionResult,
    /// When the optimistic update was applied.
    pub started_at: DateTime<Utc>,
    /// When the remote call resolved.
    pub settled_at: DateTime<Utc>,
}

impl TransitionOutcome {
    /// Returns `true` when the backend accepted the status.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self.result, TransitionResult::Committed)
    }

    /// Time the optimistic status was shown before the backend answered.
    #[must_use]
    pub fn elapsed(&self) -> TimeDelta {
        self.settled_at - self.started_at
    }
}

/// Applies status changes to a board optimistically.
///
/// [`TransitionExecutor::begin`] writes the new status straight away and
/// hands back an [`InFlightTransition`]; settling it performs the remote
/// call and either keeps the status or writes the captured one back.
/// Overlapping transitions on the same task are not serialised: each
/// rollback restores the status its own `begin` observed.
pub struct TransitionExecutor<U, N, C>
where
    U: TaskStatusUpdater,
    N: BoardNotifier,
    C: Clock + Send + Sync,
{
    board: SharedBoard,
    updater: Arc<U>,
    notifier: Arc<N>,
    clock: Arc<C>,
    company_id: Option<CompanyId>,
}

impl<U, N, C> Clone for TransitionExecutor<U, N, C>
where
    U: TaskStatusUpdater,
    N: BoardNotifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            updater: Arc::clone(&self.updater),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
            company_id: self.company_id,
        }
    }
}

impl<U, N, C> TransitionExecutor<U, N, C>
where
    U: TaskStatusUpdater,
    N: BoardNotifier,
    C: Clock + Send + Sync,
{
    /// Creates an executor for `board`.
    #[must_use]
    pub const fn new(
        board: SharedBoard,
        updater: Arc<U>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            board,
            updater,
            notifier,
            clock,
            company_id: None,
        }
    }

    /// Sets the company forwarded with every status update.
    #[must_use]
    pub const fn with_company(mut self, company_id: Option<CompanyId>) -> Self {
        self.company_id = company_id;
        self
    }

    /// Returns the board this executor mutates.
    #[must_use]
    pub const fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// Captures the task's status and applies `new_status` immediately.
    ///
    /// Returns `None`, leaving the board untouched, when the task is not on
    /// the board.
    pub fn begin(
        &self,
        task_id: TaskId,
        new_status: impl Into<String>,
    ) -> Option<InFlightTransition<U, N, C>> {
        let requested_status = new_status.into();
        let Some(previous_status) = self
            .board
            .write(|board| board.set_status(task_id, requested_status.clone()))
        else {
            tracing::debug!(%task_id, "transition ignored: task not on board");
            return None;
        };

        let id = TransitionId::new();
        tracing::debug!(
            transition = %id,
            %task_id,
            from = %previous_status,
            to = %requested_status,
            "applied optimistic status"
        );
        Some(InFlightTransition {
            id,
            task_id,
            previous_status,
            requested_status,
            started_at: self.clock.utc(),
            executor: self.clone(),
        })
    }

    /// Runs a whole transition: optimistic update, remote call, settlement.
    ///
    /// Returns `None` when the task is not on the board.
    pub async fn execute(
        &self,
        task_id: TaskId,
        new_status: impl Into<String>,
    ) -> Option<TransitionOutcome> {
        let in_flight = self.begin(task_id, new_status)?;
        Some(in_flight.settle().await)
    }
}

/// A transition whose optimistic update is applied and whose remote call
/// has not resolved yet.
pub struct InFlightTransition<U, N, C>
where
    U: TaskStatusUpdater,
    N: BoardNotifier,
    C: Clock + Send + Sync,
{
    id: TransitionId,
    task_id: TaskId,
    previous_status: String,
    requested_status: String,
    started_at: DateTime<Utc>,
    executor: TransitionExecutor<U, N, C>,
}

impl<U, N, C> InFlightTransition<U, N, C>
where
    U: TaskStatusUpdater,
    N: BoardNotifier,
    C: Clock + Send + Sync,
{
    /// Returns the transition id.
    #[must_use]
    pub const fn id(&self) -> TransitionId {
        self.id
    }

    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status captured before the optimistic update.
    #[must_use]
    pub fn previous_status(&self) -> &str {
        &self.previous_status
    }

    /// Returns the requested status.
    #[must_use]
    pub fn requested_status(&self) -> &str {
        &self.requested_status
    }

    /// Calls the backend, then commits or rolls back.
    ///
    /// Failures never propagate: they are turned into a rollback and a
    /// [`Notification::Failed`].
    #[tracing::instrument(
        skip(self),
        fields(transition = %self.id, task_id = %self.task_id, status = %self.requested_status)
    )]
    pub async fn settle(self) -> TransitionOutcome {
        let request = StatusUpdateRequest::new(self.task_id, self.requested_status.as_str())
            .with_company(self.executor.company_id);
        let remote = self.executor.updater.update_status(&request).await;
        let settled_at = self.executor.clock.utc();
        let elapsed_ms = (settled_at - self.started_at).num_milliseconds();

        let result = match remote {
            Ok(()) => {
                tracing::info!(elapsed_ms, "status update committed");
                self.executor.notifier.notify(Notification::Updated {
                    task_id: self.task_id,
                    status: self.requested_status.clone(),
                });
                TransitionResult::Committed
            }
            Err(error) => {
                tracing::debug!(elapsed_ms, "status update failed");
                self.roll_back(error)
            }
        };

        TransitionOutcome {
            id: self.id,
            task_id: self.task_id,
            previous_status: self.previous_status,
            requested_status: self.requested_status,
            result,
            started_at: self.started_at,
            settled_at,
        }
    }

    fn roll_back(&self, error: StatusUpdateError) -> TransitionResult {
        let restored = self
            .executor
            .board
            .write(|board| board.set_status(self.task_id, self.previous_status.clone()))
            .is_some();
        if restored {
            tracing::warn!(%error, restored_status = %self.previous_status, "status update rolled back");
        } else {
            tracing::warn!(%error, "status update failed and task is no longer on the board");
        }
        self.executor.notifier.notify(Notification::Failed {
            task_id: self.task_id,
            message: error.user_message(),
        });
        TransitionResult::RolledBack { error, restored }
    }
}

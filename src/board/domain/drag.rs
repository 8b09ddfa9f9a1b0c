//! Drag interaction state machine.
//!
//! The controller is independent of any UI toolkit: it consumes a drag start
//! naming a task and a drag end naming the raw id of whatever the pointer was
//! released over, and decides whether a status transition is needed.

use super::{BoardState, ColumnId, TaskId, classify};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A task is being dragged.
    Dragging {
        /// The task being dragged.
        task_id: TaskId,
    },
}

/// What a drop landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A column, identified by its canonical id.
    Column(ColumnId),
    /// Another task card on the board.
    Task(TaskId),
}

impl DropTarget {
    /// Resolves a raw drop-target id against the board.
    ///
    /// Column ids win over task ids. Returns `None` when the id names neither
    /// a column nor a task currently on the board.
    #[must_use]
    pub fn resolve(board: &BoardState, over_id: &str) -> Option<Self> {
        if let Some(column) = ColumnId::from_drop_id(over_id) {
            return Some(Self::Column(column));
        }
        TaskId::try_from(over_id)
            .ok()
            .filter(|task_id| board.contains(*task_id))
            .map(Self::Task)
    }

    /// Returns the status a task dropped here should take.
    ///
    /// Dropping on a task adopts that task's raw status; no position within
    /// the column is implied.
    #[must_use]
    pub fn target_status(self, board: &BoardState) -> Option<String> {
        match self {
            Self::Column(column) => Some(column.as_str().to_owned()),
            Self::Task(task_id) => board.status_of(task_id).map(str::to_owned),
        }
    }
}

/// A status change the controller wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Task to move.
    pub task_id: TaskId,
    /// Status the task had when the drag ended.
    pub from: String,
    /// Status the task should take.
    pub to: String,
}

/// Result of a drag end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragResolution {
    /// No drag was in progress.
    NotDragging,
    /// The drop resolved to nothing, or the dragged task left the board.
    Cancelled {
        /// The task that was being dragged.
        task_id: TaskId,
    },
    /// The drop resolved to the task's current column.
    Unchanged {
        /// The task that was being dragged.
        task_id: TaskId,
    },
    /// The task should move to another column.
    Move(TransitionPlan),
}

/// `Idle`/`Dragging` controller for one board.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Returns the dragged task, if any.
    #[must_use]
    pub const fn active_task(&self) -> Option<TaskId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { task_id } => Some(task_id),
        }
    }

    /// Starts dragging a task.
    ///
    /// Returns `false` and leaves the state untouched when the task is not on
    /// the board.
    pub fn drag_start(&mut self, board: &BoardState, task_id: TaskId) -> bool {
        if !board.contains(task_id) {
            return false;
        }
        self.state = DragState::Dragging { task_id };
        true
    }

    /// Abandons the current drag without resolving a target.
    pub const fn drag_cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Ends the current drag over `over_id` and returns to `Idle`.
    ///
    /// `over_id` is `None` when the pointer was released outside every drop
    /// zone.
    pub fn drag_end(&mut self, board: &BoardState, over_id: Option<&str>) -> DragResolution {
        let DragState::Dragging { task_id } = std::mem::take(&mut self.state) else {
            return DragResolution::NotDragging;
        };

        let Some(current) = board.status_of(task_id) else {
            return DragResolution::Cancelled { task_id };
        };
        let Some(target) = over_id
            .and_then(|id| DropTarget::resolve(board, id))
            .and_then(|target| target.target_status(board))
        else {
            return DragResolution::Cancelled { task_id };
        };

        if classify(&target) == classify(current) {
            return DragResolution::Unchanged { task_id };
        }

        DragResolution::Move(TransitionPlan {
            task_id,
            from: current.to_owned(),
            to: target,
        })
    }
}

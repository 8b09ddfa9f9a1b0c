//! Domain model for the kanban task board.
//!
//! The domain covers task records, the total status-to-column classifier,
//! the board state store, and the drag interaction state machine. It holds
//! no I/O: remote calls and notifications live behind the ports.

mod column;
mod drag;
mod error;
mod ids;
mod state;
mod task;

pub use column::{ColumnId, classify};
pub use drag::{DragController, DragResolution, DragState, DropTarget, TransitionPlan};
pub use error::BoardDomainError;
pub use ids::{CompanyId, EmployeeId, ProjectId, TaskId, TransitionId};
pub use state::{BoardColumns, BoardState, ColumnView, SharedBoard};
pub use task::{DEFAULT_PRIORITY_LABEL, TaskPriority, TaskRecord, parse_priority};

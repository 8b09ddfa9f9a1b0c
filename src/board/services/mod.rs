//! Application services for the kanban board.

mod session;
mod transition;

pub use session::{
    BoardSession, BoardSessionError, BoardSessionResult, DispatchedTransition, DragEndOutcome,
};
pub use transition::{
    InFlightTransition, TransitionExecutor, TransitionOutcome, TransitionResult,
};

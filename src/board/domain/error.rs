//! Error types for board domain parsing.

use thiserror::Error;

/// Errors returned while parsing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The value is not a decimal task identifier.
    #[error("invalid task id '{0}', expected an unsigned integer")]
    InvalidTaskId(String),

    /// The priority label is not one of `High`, `Medium`, or `Low`.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),
}

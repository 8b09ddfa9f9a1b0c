//! Identifier types for the board domain.
//!
//! The CRM backend keys tasks, projects, companies, and employees by numeric
//! database ids. They are wrapped so that a task id can never be passed where
//! a project id is expected.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw backend identifier.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw backend identifier.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Identifier of a task record, stable for the task's lifetime.
    TaskId
}

numeric_id! {
    /// Identifier of the project whose tasks a board displays.
    ProjectId
}

numeric_id! {
    /// Tenant identifier threaded through status updates.
    CompanyId
}

numeric_id! {
    /// Identifier of an employee assigned to, or assigning, a task.
    EmployeeId
}

impl TryFrom<&str> for TaskId {
    type Error = BoardDomainError;

    /// Parses a drag element id. Element ids are the decimal rendering of the
    /// task id, so no trimming or case folding is applied.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value
            .parse::<u64>()
            .map(Self)
            .map_err(|_| BoardDomainError::InvalidTaskId(value.to_owned()))
    }
}

/// Correlation id for one optimistic transition.
///
/// Two overlapping drags of the same task produce two transitions with
/// distinct ids, which keeps their log lines apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(Uuid);

impl TransitionId {
    /// Creates a new random transition identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TransitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

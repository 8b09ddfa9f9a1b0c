//! Canonical board columns and the status classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed kanban columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    /// Work not yet started. Also receives every unrecognised status.
    Pending,
    /// Work underway.
    InProgress,
    /// Work awaiting review.
    Review,
    /// Completed work.
    Closed,
}

impl ColumnId {
    /// All columns in board order, left to right.
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Review, Self::Closed];

    /// Returns the canonical column id, which doubles as the status string
    /// sent to the backend and as the column's drop-target id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Closed => "closed",
        }
    }

    /// Returns the column heading shown above the column.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pending => "Backlog",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Closed => "Completed",
        }
    }

    /// Matches a raw drop-target id against the canonical column ids.
    ///
    /// Drop targets carry the exact id they were registered with, so this
    /// comparison is case-sensitive, unlike [`classify`].
    #[must_use]
    pub fn from_drop_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.as_str() == id)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw task status to its board column.
///
/// The status is lower-cased and matched against the canonical column ids;
/// anything else, including the empty string, lands in
/// [`ColumnId::Pending`]. The function is total.
#[must_use]
pub fn classify(status: &str) -> ColumnId {
    let normalized = status.to_lowercase();
    ColumnId::from_drop_id(&normalized).unwrap_or(ColumnId::Pending)
}

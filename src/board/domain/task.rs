//! Task record displayed on the board.

use super::{BoardDomainError, ColumnId, EmployeeId, TaskId, classify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Display label used when a task carries no recognised priority.
pub const DEFAULT_PRIORITY_LABEL: &str = "Normal";

/// Task priority label. Display only; it never affects placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// High priority.
    High,
    /// Medium priority.
    Medium,
    /// Low priority.
    Low,
}

impl TaskPriority {
    /// Returns the label as the backend spells it.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(BoardDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a priority leniently: unknown or missing labels become `None`.
#[must_use]
pub fn parse_priority(label: Option<&str>) -> Option<TaskPriority> {
    label.and_then(|value| TaskPriority::try_from(value).ok())
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<TaskPriority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(parse_priority(raw.as_deref()))
}

/// One unit of work on a project board.
///
/// The serialised form uses the field names the board UI consumes
/// (`taskId`, `taskName`, `deadlineTimestamp`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    task_id: TaskId,
    task_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: String,
    #[serde(default, deserialize_with = "lenient_priority")]
    priority: Option<TaskPriority>,
    #[serde(default, rename = "deadlineTimestamp")]
    deadline: Option<DateTime<Utc>>,
    #[serde(default, rename = "assignedTimestamp")]
    assigned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    assigned_by: Option<EmployeeId>,
    #[serde(default)]
    assigned_employees: Vec<EmployeeId>,
}

impl TaskRecord {
    /// Creates a task record with the required fields.
    #[must_use]
    pub fn new(task_id: TaskId, task_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            task_id,
            task_name: task_name.into(),
            description: String::new(),
            status: status.into(),
            priority: None,
            deadline: None,
            assigned_at: None,
            assigned_by: None,
            assigned_employees: Vec::new(),
        }
    }

    /// Sets the description text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority label.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Records who assigned the task and when.
    #[must_use]
    pub const fn with_assignment(
        mut self,
        assigned_by: Option<EmployeeId>,
        assigned_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.assigned_by = assigned_by;
        self.assigned_at = assigned_at;
        self
    }

    /// Sets the employees working on the task.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = EmployeeId>) -> Self {
        self.assigned_employees = assignees.into_iter().collect();
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the task name.
    #[must_use]
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Returns the description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the raw status string as last set.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the column this task is displayed in.
    #[must_use]
    pub fn column(&self) -> ColumnId {
        classify(&self.status)
    }

    /// Returns the priority, if recognised.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the priority badge text.
    #[must_use]
    pub fn priority_label(&self) -> &'static str {
        self.priority
            .map_or(DEFAULT_PRIORITY_LABEL, TaskPriority::label)
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns when the task was assigned, if known.
    #[must_use]
    pub const fn assigned_at(&self) -> Option<DateTime<Utc>> {
        self.assigned_at
    }

    /// Returns who assigned the task, if known.
    #[must_use]
    pub const fn assigned_by(&self) -> Option<EmployeeId> {
        self.assigned_by
    }

    /// Returns the assigned employees.
    #[must_use]
    pub fn assigned_employees(&self) -> &[EmployeeId] {
        &self.assigned_employees
    }

    /// Overwrites the status and returns the value it replaced.
    pub(crate) fn replace_status(&mut self, status: String) -> String {
        std::mem::replace(&mut self.status, status)
    }
}

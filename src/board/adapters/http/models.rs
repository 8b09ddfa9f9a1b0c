//! Wire models for the CRM backend's project endpoints.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{
    domain::{EmployeeId, TaskRecord, parse_priority},
    ports::StatusUpdateRequest,
};

/// Body of `PUT /project/task/update-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusBody<'a> {
    pub task_id: u64,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,
}

impl<'a> From<&'a StatusUpdateRequest> for UpdateTaskStatusBody<'a> {
    fn from(request: &'a StatusUpdateRequest) -> Self {
        Self {
            task_id: request.task_id.value(),
            status: &request.status,
            company_id: request.company_id.map(|id| id.value()),
        }
    }
}

/// Response envelope wrapping every backend answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub attributes: Option<T>,
    #[serde(default)]
    pub errors: Vec<BackendError>,
}

/// Error entry of a response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendError {
    /// Returns the error code as an HTTP-style status, when it is numeric.
    pub fn numeric_code(&self) -> Option<u16> {
        self.code.as_deref().and_then(|code| code.trim().parse().ok())
    }
}

/// Spring `Page` as serialised by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPage<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    /// 0-based page number.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_elements: u64,
}

/// Task as the backend serialises it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendTask {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<String>,
    #[serde(default)]
    pub assigned_by: Option<u64>,
    #[serde(default)]
    pub assigned_employee_ids: Option<Vec<u64>>,
}

impl BackendTask {
    /// Maps the backend task onto a board task record.
    pub fn into_record(self) -> TaskRecord {
        let assigned_at = self.assigned_at.as_deref().and_then(parse_backend_timestamp);
        let mut record = TaskRecord::new(
            self.id.into(),
            self.name.unwrap_or_default(),
            self.status.unwrap_or_default(),
        )
        .with_description(self.description.unwrap_or_default())
        .with_assignment(self.assigned_by.map(EmployeeId::new), assigned_at)
        .with_assignees(
            self.assigned_employee_ids
                .unwrap_or_default()
                .into_iter()
                .map(EmployeeId::new),
        );
        if let Some(priority) = parse_priority(self.priority.as_deref()) {
            record = record.with_priority(priority);
        }
        if let Some(deadline) = self.deadline.as_deref().and_then(parse_backend_timestamp) {
            record = record.with_deadline(deadline);
        }
        record
    }
}

/// Parses a backend timestamp.
///
/// The backend emits zone-less local date-times, read here as UTC. Values
/// that already carry an offset are converted.
pub fn parse_backend_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Digs a human-readable message out of an error body.
///
/// Understands the backend envelope (`errors[0].message`), the proxy shape
/// (`error.message`), and a bare `message` field.
pub fn error_message_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let candidates = [
        value.pointer("/errors/0/message"),
        value.pointer("/error/message"),
        value.pointer("/message"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_owned)
}

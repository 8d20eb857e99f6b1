//! Task model and worksheet row mapping.
//!
//! A task is one row of the worksheet. The column layout is owned by this
//! crate and fixed (see [`crate::store::HEADER`]); cells beyond the schema
//! are never read or written, so extra columns a human adds to the sheet are
//! left alone.

use std::fmt;

use chrono::{NaiveDate, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Result, TaskError};
use crate::store;

/// Date format required for `due_date` values.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task lifecycle status. Closed set; anything else is rejected at the
/// adapter boundary and never written to the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Parse a caller-supplied status string.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(TaskError::validation(format!(
                "unknown status '{}' (expected one of: pending, in_progress, done)",
                other
            ))),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One task, as stored in (and returned from) the sheet.
///
/// Timestamps are RFC 3339 UTC strings written by this adapter; they are
/// returned verbatim from the sheet, so rows a human typed in by hand keep
/// whatever is in those cells.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable generated identifier, never a row number.
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    /// Due date in YYYY-MM-DD format, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Free-form notes, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    /// Create a new task with a generated id and fresh timestamps.
    /// Inputs are assumed validated.
    pub fn new(
        title: String,
        status: TaskStatus,
        due_date: Option<String>,
        notes: Option<String>,
    ) -> Self {
        let now = now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            status,
            due_date,
            notes,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Serialize into one worksheet row, in schema column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.status.as_str().to_string(),
            self.due_date.clone().unwrap_or_default(),
            self.notes.clone().unwrap_or_default(),
            self.created_at.clone(),
            self.updated_at.clone(),
        ]
    }

    /// Deserialize a worksheet row. Returns `None` for rows without an id
    /// cell (blank lines or human scribbles), which the adapter skips and
    /// never mutates. Short rows are tolerated; missing cells read as empty.
    ///
    /// A status cell that does not match the closed set (a human edit) is
    /// reported as `pending` rather than failing the whole listing.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or("").trim();

        let id = cell(store::COL_ID);
        if id.is_empty() {
            return None;
        }

        let status = match TaskStatus::parse(cell(store::COL_STATUS)) {
            Ok(status) => status,
            Err(_) => {
                tracing::warn!(id, status = cell(store::COL_STATUS), "unrecognized status cell, reading as pending");
                TaskStatus::Pending
            }
        };

        let optional = |index: usize| {
            let value = cell(index);
            (!value.is_empty()).then(|| value.to_string())
        };

        Some(Self {
            id: id.to_string(),
            title: cell(store::COL_TITLE).to_string(),
            status,
            due_date: optional(store::COL_DUE_DATE),
            notes: optional(store::COL_NOTES),
            created_at: cell(store::COL_CREATED_AT).to_string(),
            updated_at: cell(store::COL_UPDATED_AT).to_string(),
        })
    }

    /// Refresh `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.updated_at = now_rfc3339();
    }
}

/// Partial field set for `update_task`. `None` means "leave unchanged".
#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.notes.is_none()
    }
}

/// Validate and normalize a task title: required, non-empty after trimming.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskError::validation("title must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Validate a due date string against [`DUE_DATE_FORMAT`].
pub fn validate_due_date(value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).map_err(|_| {
        TaskError::validation(format!(
            "due_date '{}' must be in YYYY-MM-DD format",
            value
        ))
    })?;
    Ok(())
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

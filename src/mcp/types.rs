//! Tool parameter and result types.
//!
//! Parameters deliberately take `status` as a plain string and validate it
//! against the closed status set inside the adapter, so a caller sending an
//! unknown value gets a clear invalid-params error instead of a schema
//! mismatch buried in the transport layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::task::Task;

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksParams {
    /// Only return tasks with this status: "pending", "in_progress", or "done"
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskParams {
    /// Task title (required, must not be empty)
    pub title: String,
    /// Initial status: "pending" (default), "in_progress", or "done"
    pub status: Option<String>,
    /// Due date in YYYY-MM-DD format
    pub due_date: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskParams {
    /// Id of the task to update, as returned by add_task or list_tasks
    pub id: String,
    /// New title (must not be empty if given)
    pub title: Option<String>,
    /// New status: "pending", "in_progress", or "done"
    pub status: Option<String>,
    /// New due date in YYYY-MM-DD format
    pub due_date: Option<String>,
    /// New free-form notes
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskParams {
    /// Id of the task to delete
    pub id: String,
}

// ============================================================
// Results
// ============================================================

/// Result of list_tasks, in sheet row order.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResult {
    pub total_count: usize,
    pub tasks: Vec<Task>,
}

/// Confirmation returned by delete_task.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskResult {
    /// Id of the removed task
    pub id: String,
    pub deleted: bool,
}

//! The task service: translates task operations into row operations.
//!
//! Stateless by design. Every call re-reads live sheet state, because a
//! human (or another process) may edit the worksheet between calls; ids are
//! resolved to row positions by scanning the id column fresh each time and
//! are never assumed to equal row numbers. Validation happens before any
//! backend call, so a rejected request leaves the sheet untouched.

use crate::error::{Result, TaskError};
use crate::store::{self, RowStore};
use crate::task::{Task, TaskPatch, TaskStatus, validate_due_date, validate_title};

pub struct TaskService<S> {
    store: S,
}

impl<S: RowStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List tasks in sheet row order, optionally filtered by status.
    /// Rows without an id cell are skipped.
    pub async fn list(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let rows = self.store.read_rows().await?;
        let tasks = rows
            .iter()
            .filter_map(|row| Task::from_row(row))
            .filter(|task| status.is_none_or(|wanted| task.status == wanted))
            .collect::<Vec<_>>();
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Append a new task. Not idempotent: repeated calls create duplicates.
    pub async fn add(
        &self,
        title: &str,
        status: Option<TaskStatus>,
        due_date: Option<String>,
        notes: Option<String>,
    ) -> Result<Task> {
        let title = validate_title(title)?;
        if let Some(due_date) = &due_date {
            validate_due_date(due_date)?;
        }

        let task = Task::new(title, status.unwrap_or_default(), due_date, notes);
        self.store.append_row(task.to_row()).await?;
        tracing::debug!(id = task.id, "added task");
        Ok(task)
    }

    /// Merge a partial field set into an existing task and write the row
    /// back in place, refreshing `updated_at`.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return Err(TaskError::validation(
                "update_task requires at least one field to change",
            ));
        }
        let title = match &patch.title {
            Some(title) => Some(validate_title(title)?),
            None => None,
        };
        if let Some(due_date) = &patch.due_date {
            validate_due_date(due_date)?;
        }

        let (index, mut task) = self.find(id).await?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(notes) = patch.notes {
            task.notes = Some(notes);
        }
        task.touch();

        self.store.update_row(index, task.to_row()).await?;
        tracing::debug!(id = task.id, "updated task");
        Ok(task)
    }

    /// Hard-delete a task row. Deleting an id a second time reports
    /// `NotFound` rather than silently succeeding.
    pub async fn delete(&self, id: &str) -> Result<String> {
        let (index, task) = self.find(id).await?;
        self.store.delete_row(index).await?;
        tracing::debug!(id = task.id, "deleted task");
        Ok(task.id)
    }

    /// Resolve an id to its current 0-based data row index by scanning the
    /// id column. The index is only valid for the write issued right after.
    async fn find(&self, id: &str) -> Result<(usize, Task)> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TaskError::validation("id must not be empty"));
        }

        let rows = self.store.read_rows().await?;
        for (index, row) in rows.iter().enumerate() {
            if row.get(store::COL_ID).map(String::as_str) == Some(id) {
                if let Some(task) = Task::from_row(row) {
                    return Ok((index, task));
                }
            }
        }
        Err(TaskError::not_found(id))
    }
}

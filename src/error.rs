//! Error taxonomy for task operations.
//!
//! Every tool call resolves to one of three kinds: the caller sent bad input
//! (`Validation`), the caller referenced a task that does not exist
//! (`NotFound`), or the backing sheet could not be read or written
//! (`Backend`). None of them is fatal to the process; the MCP layer maps each
//! kind to a structured error result and the next call starts fresh.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Caller-supplied arguments are malformed (empty title, unknown status,
    /// bad date format). Raised before any backend call is attempted.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The referenced task id does not exist in the sheet.
    #[error("task '{id}' not found")]
    NotFound { id: String },

    /// The backing sheet is unreachable, rejected the request, or timed out.
    #[error("sheet backend error: {0}")]
    Backend(String),
}

impl TaskError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

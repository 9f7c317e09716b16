//! Error types for task list operations.

use thiserror::Error;

/// Failures of the in-memory store mutations. Both are recoverable: the
/// caller is expected to ask the user again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task number outside `1..=len`.
    #[error("Invalid task number {position} (expected 1-{len})")]
    OutOfRange { position: usize, len: usize },

    /// Task text is blank after trimming.
    #[error("The task is blank")]
    EmptyTask,
}

/// Failures while reading or writing the JSON task file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed task file: {0}")]
    Json(#[from] serde_json::Error),
}

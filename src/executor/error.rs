//! Query execution errors.

use thiserror::Error;

use crate::store::StorageError;

/// Result type for query execution.
pub type ExecuteResult<T> = Result<T, ExecuteError>;

/// Query execution errors.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// Store failure, passed through unchanged. Not retried here.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

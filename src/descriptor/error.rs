//! Descriptor construction and parsing errors.

use thiserror::Error;

/// Result type for descriptor operations.
pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Errors raised while building or parsing a query descriptor.
#[derive(Debug, Clone, Error)]
pub enum DescriptorError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("argument count mismatch: operators take {expected}, caller supplied {supplied}")]
    ArityMismatch { expected: usize, supplied: usize },

    #[error("conditions mix AND and OR without grouping")]
    AmbiguousCombinator,

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("empty descriptor")]
    Empty,
}

//! Predicate construction errors.

use thiserror::Error;

use crate::descriptor::DescriptorError;

/// Result type for predicate operations.
pub type PredicateResult<T> = Result<T, PredicateError>;

/// Errors raised while binding arguments into a predicate tree.
#[derive(Debug, Clone, Error)]
pub enum PredicateError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("invalid range for {field}: low {low} > high {high}")]
    InvalidRange {
        field: String,
        low: String,
        high: String,
    },

    #[error("invalid argument for {field}: expected {expected}, got {value}")]
    InvalidArgument {
        field: String,
        expected: String,
        value: String,
    },
}

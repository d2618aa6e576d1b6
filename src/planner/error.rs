//! Planning errors.

use thiserror::Error;

use crate::descriptor::DescriptorError;
use crate::predicate::PredicateError;

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Query planning errors.
#[derive(Debug, Clone, Error)]
pub enum PlanError {
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("predicate error: {0}")]
    Predicate(#[from] PredicateError),

    #[error("invalid limit: {0} (limit must be positive)")]
    InvalidLimit(usize),
}

//! Store error types.

use thiserror::Error;

use super::types::{CollectionName, InvalidNameError, RecordKey};

/// result type alias for store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// the main error type for store operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// the requested collection was not found
    #[error("collection not found: {0}")]
    CollectionNotFound(CollectionName),

    /// the collection already exists
    #[error("collection already exists: {0}")]
    CollectionAlreadyExists(CollectionName),

    /// the record already exists (duplicate key)
    #[error("record already exists: collection={collection}, key={key}")]
    RecordAlreadyExists {
        collection: CollectionName,
        key: RecordKey,
    },

    /// invalid collection or key name
    #[error("invalid name: {0}")]
    InvalidName(#[from] InvalidNameError),

    /// JSON serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// backend-specific failure, passed through opaquely
    #[error("backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// check if this error indicates the resource doesn't exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::CollectionNotFound(_))
    }

    /// check if this error is a conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            StorageError::RecordAlreadyExists { .. } | StorageError::CollectionAlreadyExists(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let not_found =
            StorageError::CollectionNotFound(CollectionName::new("products").unwrap());
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());

        let conflict = StorageError::RecordAlreadyExists {
            collection: CollectionName::new("products").unwrap(),
            key: RecordKey::new("123").unwrap(),
        };
        assert!(!conflict.is_not_found());
        assert!(conflict.is_conflict());
    }
}

//! The storage collaborator contract.

use std::sync::Arc;

use super::error::StorageResult;
use super::types::{CollectionName, Record};
use crate::descriptor::SortKey;
use crate::predicate::PredicateNode;

/// The single read capability the engine requires of a backend.
///
/// The store owns its synchronization: concurrent readers must see
/// consistent snapshots without help from the engine.
pub trait RecordStore {
    /// Scan a collection: return the records matching `predicate`, in
    /// the requested order (or the store's natural order when `order`
    /// is empty), capped at `limit` rows.
    fn scan(
        &self,
        collection: &CollectionName,
        predicate: &PredicateNode,
        order: &[SortKey],
        limit: Option<usize>,
    ) -> StorageResult<Vec<Record>>;

    /// Whether this store de-duplicates distinct queries itself. When
    /// false, the executor de-duplicates by natural key after the scan.
    fn supports_distinct(&self) -> bool {
        false
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn scan(
        &self,
        collection: &CollectionName,
        predicate: &PredicateNode,
        order: &[SortKey],
        limit: Option<usize>,
    ) -> StorageResult<Vec<Record>> {
        (**self).scan(collection, predicate, order, limit)
    }

    fn supports_distinct(&self) -> bool {
        (**self).supports_distinct()
    }
}

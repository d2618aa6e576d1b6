//! In-memory reference store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::backend::RecordStore;
use super::error::{StorageError, StorageResult};
use super::types::{CollectionName, Record, RecordKey};
use crate::descriptor::SortKey;
use crate::predicate::{sort_records, PredicateNode};

/// An in-memory record store.
///
/// Collections are `BTreeMap`s keyed by [`RecordKey`], so the natural
/// scan order is ascending key order. Writes go through `&self`; the
/// inner lock keeps concurrent readers consistent.
pub struct MemoryStore {
    collections: RwLock<BTreeMap<CollectionName, BTreeMap<RecordKey, Record>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a collection.
    pub fn create_collection(&self, name: CollectionName) -> StorageResult<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(&name) {
            return Err(StorageError::CollectionAlreadyExists(name));
        }
        collections.insert(name, BTreeMap::new());
        Ok(())
    }

    /// Insert a record under a freshly generated key. Returns the key.
    pub fn insert(&self, collection: &CollectionName, record: Record) -> StorageResult<RecordKey> {
        let key = RecordKey::generate();
        self.insert_with_key(collection, key.clone(), record)?;
        Ok(key)
    }

    /// Insert a record under a caller-chosen key.
    pub fn insert_with_key(
        &self,
        collection: &CollectionName,
        key: RecordKey,
        record: Record,
    ) -> StorageResult<()> {
        let mut collections = self.collections.write();
        let records = collections
            .get_mut(collection)
            .ok_or_else(|| StorageError::CollectionNotFound(collection.clone()))?;
        if records.contains_key(&key) {
            return Err(StorageError::RecordAlreadyExists {
                collection: collection.clone(),
                key,
            });
        }
        records.insert(key, record);
        Ok(())
    }

    /// Number of records in a collection.
    pub fn len(&self, collection: &CollectionName) -> StorageResult<usize> {
        let collections = self.collections.read();
        collections
            .get(collection)
            .map(BTreeMap::len)
            .ok_or_else(|| StorageError::CollectionNotFound(collection.clone()))
    }

    /// Check if a collection is empty.
    pub fn is_empty(&self, collection: &CollectionName) -> StorageResult<bool> {
        Ok(self.len(collection)? == 0)
    }

    /// List collection names.
    pub fn collections(&self) -> Vec<CollectionName> {
        self.collections.read().keys().cloned().collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn scan(
        &self,
        collection: &CollectionName,
        predicate: &PredicateNode,
        order: &[SortKey],
        limit: Option<usize>,
    ) -> StorageResult<Vec<Record>> {
        let collections = self.collections.read();
        let records = collections
            .get(collection)
            .ok_or_else(|| StorageError::CollectionNotFound(collection.clone()))?;

        let mut matched: Vec<Record> = records
            .values()
            .filter(|record| predicate.matches(record))
            .cloned()
            .collect();

        if !order.is_empty() {
            sort_records(&mut matched, order);
        }
        if let Some(limit) = limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Operator, SortDirection};
    use crate::schema::{FieldSpec, FieldType};
    use serde_json::json;

    fn products() -> (MemoryStore, CollectionName) {
        let store = MemoryStore::new();
        let name = CollectionName::new("products").unwrap();
        store.create_collection(name.clone()).unwrap();
        for (product, price) in [("Widget", 10.0), ("Gadget", 25.0), ("Doohickey", 5.0)] {
            let record = json!({"name": product, "price": price})
                .as_object()
                .unwrap()
                .clone();
            store.insert(&name, record).unwrap();
        }
        (store, name)
    }

    fn price_leaf(op: Operator, args: Vec<serde_json::Value>) -> PredicateNode {
        PredicateNode::Compare {
            field: FieldSpec::new("price", FieldType::Decimal),
            op,
            args,
            fold_case: false,
        }
    }

    #[test]
    fn test_create_collection_twice_fails() {
        let store = MemoryStore::new();
        let name = CollectionName::new("products").unwrap();
        store.create_collection(name.clone()).unwrap();
        let result = store.create_collection(name);
        assert!(matches!(
            result,
            Err(StorageError::CollectionAlreadyExists(_))
        ));
    }

    #[test]
    fn test_scan_unknown_collection_fails() {
        let store = MemoryStore::new();
        let name = CollectionName::new("missing").unwrap();
        let result = store.scan(&name, &PredicateNode::always(), &[], None);
        assert!(matches!(result, Err(StorageError::CollectionNotFound(_))));
    }

    #[test]
    fn test_scan_filters_by_predicate() {
        let (store, name) = products();
        let rows = store
            .scan(&name, &price_leaf(Operator::GreaterThan, vec![json!(8)]), &[], None)
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_scan_orders_and_limits() {
        let (store, name) = products();
        let order = [SortKey {
            field: FieldSpec::new("price", FieldType::Decimal),
            direction: SortDirection::Descending,
        }];
        let rows = store
            .scan(&name, &PredicateNode::always(), &order, Some(2))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Gadget");
        assert_eq!(rows[1]["name"], "Widget");
    }

    #[test]
    fn test_insert_preserves_key_order() {
        let store = MemoryStore::new();
        let name = CollectionName::new("items").unwrap();
        store.create_collection(name.clone()).unwrap();
        for label in ["first", "second", "third"] {
            let key = RecordKey::new(label).unwrap();
            let record = json!({ "label": label }).as_object().unwrap().clone();
            store.insert_with_key(&name, key, record).unwrap();
        }

        let rows = store.scan(&name, &PredicateNode::always(), &[], None).unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r["label"].as_str().unwrap()).collect();
        // BTreeMap natural order is ascending key order.
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_len() {
        let (store, name) = products();
        assert_eq!(store.len(&name).unwrap(), 3);
        assert!(!store.is_empty(&name).unwrap());
    }
}

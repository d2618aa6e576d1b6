//! Main query executor.

use std::collections::HashSet;

use tracing::debug;

use super::error::ExecuteResult;
use super::result::{QueryOutput, ResultShape};
use crate::planner::QueryPlan;
use crate::schema::EntitySchema;
use crate::store::{CollectionName, Record, RecordStore};

/// The query executor.
///
/// Performs exactly one read against the store per call. When several
/// rows satisfy a single-row shape, the first row in the store's
/// natural order wins; the engine does not impose a tie-break of its
/// own.
pub struct QueryExecutor<S> {
    store: S,
    schema: EntitySchema,
}

impl<S: RecordStore> QueryExecutor<S> {
    /// Create a new executor over a store.
    pub fn new(store: S, schema: EntitySchema) -> Self {
        Self { store, schema }
    }

    /// The schema whose natural key drives distinct de-duplication.
    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Execute a plan against a collection and shape the result.
    pub fn execute(
        &self,
        collection: &CollectionName,
        plan: &QueryPlan,
        shape: ResultShape,
    ) -> ExecuteResult<QueryOutput> {
        let dedup_here = plan.distinct && !self.store.supports_distinct();

        // When de-duplicating after the scan, the limit must apply to
        // distinct rows, not raw rows, so it cannot be pushed down.
        let push_limit = if dedup_here { None } else { plan.limit };
        let rows = self
            .store
            .scan(collection, &plan.predicate, &plan.order, push_limit)?;

        let rows = if dedup_here {
            let mut rows = dedup_by_key(rows, &self.schema.key);
            if let Some(limit) = plan.limit {
                rows.truncate(limit);
            }
            rows
        } else {
            rows
        };

        debug!(
            collection = %collection,
            rows = rows.len(),
            distinct = plan.distinct,
            "scan complete"
        );

        Ok(match shape {
            ResultShape::SingleOrNull | ResultShape::SingleOptional => {
                QueryOutput::Single(rows.into_iter().next())
            }
            ResultShape::List => QueryOutput::Many(rows),
        })
    }
}

/// Keep the first record per natural-key value, preserving scan order.
/// Records without the key field are kept as-is.
fn dedup_by_key(rows: Vec<Record>, key: &str) -> Vec<Record> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| match row.get(key) {
            Some(value) => seen.insert(value.to_string()),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DescriptorBuilder, Operator, SortDirection};
    use crate::planner::QueryPlanner;
    use crate::schema::{FieldType, SchemaBuilder};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn schema() -> EntitySchema {
        SchemaBuilder::new("product")
            .field("id", FieldType::Integer)
            .field("name", FieldType::Text)
            .field("price", FieldType::Decimal)
            .key("id")
            .build()
            .unwrap()
    }

    fn setup() -> (QueryExecutor<MemoryStore>, QueryPlanner, CollectionName) {
        let store = MemoryStore::new();
        let collection = CollectionName::new("products").unwrap();
        store.create_collection(collection.clone()).unwrap();
        for (id, name, price) in [
            (1, "Widget", 10.0),
            (2, "Gadget", 25.0),
            (1, "Widget", 10.0), // same natural key, different record
            (3, "Doohickey", 5.0),
        ] {
            let record = json!({"id": id, "name": name, "price": price})
                .as_object()
                .unwrap()
                .clone();
            store.insert(&collection, record).unwrap();
        }
        (
            QueryExecutor::new(store, schema()),
            QueryPlanner::new(schema()),
            collection,
        )
    }

    #[test]
    fn test_list_shape_returns_all_matches() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .filter("price", Operator::GreaterThan)
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![json!(8)]).unwrap();

        let output = executor
            .execute(&collection, &plan, ResultShape::List)
            .unwrap();
        assert_eq!(output.len(), 3);
    }

    #[test]
    fn test_list_shape_empty_is_not_an_error() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .filter("price", Operator::GreaterThan)
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![json!(1000)]).unwrap();

        let output = executor
            .execute(&collection, &plan, ResultShape::List)
            .unwrap();
        assert_eq!(output, QueryOutput::Many(Vec::new()));
    }

    #[test]
    fn test_single_shape_returns_none_on_zero_matches() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .filter("name", Operator::Equals)
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![json!("Sprocket")]).unwrap();

        let output = executor
            .execute(&collection, &plan, ResultShape::SingleOrNull)
            .unwrap();
        assert_eq!(output, QueryOutput::Single(None));
    }

    #[test]
    fn test_single_shape_takes_first_in_natural_order() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .filter("name", Operator::Equals)
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![json!("Widget")]).unwrap();

        let output = executor
            .execute(&collection, &plan, ResultShape::SingleOptional)
            .unwrap();
        assert_eq!(output.len(), 1);
    }

    #[test]
    fn test_distinct_dedups_by_natural_key() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .distinct()
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![]).unwrap();

        let output = executor
            .execute(&collection, &plan, ResultShape::List)
            .unwrap();
        // Four rows stored, but ids 1/2/3 only.
        assert_eq!(output.len(), 3);
    }

    #[test]
    fn test_limit_beyond_row_count_returns_all() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .limit(10)
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![]).unwrap();

        let output = executor
            .execute(&collection, &plan, ResultShape::List)
            .unwrap();
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn test_distinct_limit_applies_to_distinct_rows() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .distinct()
            .limit(2)
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![]).unwrap();

        let output = executor
            .execute(&collection, &plan, ResultShape::List)
            .unwrap();
        // Three distinct ids exist; the limit caps distinct rows.
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_order_and_limit_flow_through() {
        let (executor, planner, collection) = setup();
        let descriptor = DescriptorBuilder::new()
            .order_by("price", SortDirection::Descending)
            .limit(2)
            .build(planner.schema())
            .unwrap();
        let plan = planner.plan(&descriptor, vec![]).unwrap();

        let rows = executor
            .execute(&collection, &plan, ResultShape::List)
            .unwrap()
            .into_many();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Gadget");
    }
}

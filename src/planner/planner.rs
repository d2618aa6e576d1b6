//! Query planner - converts descriptors and arguments into plans.
//!
//! The planner is the entry point for query construction: it checks
//! arity, binds arguments into a predicate tree, and attaches ordering,
//! limit and distinctness.

use serde_json::Value;
use tracing::debug;

use super::error::{PlanError, PlanResult};
use super::plan::QueryPlan;
use crate::descriptor::QueryDescriptor;
use crate::predicate::PredicateBuilder;
use crate::schema::EntitySchema;

/// Planner configuration options.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Evaluate `Containing` conditions case-insensitively.
    pub case_insensitive_containing: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            case_insensitive_containing: false,
        }
    }
}

/// The query planner.
pub struct QueryPlanner {
    schema: EntitySchema,
    config: PlannerConfig,
}

impl QueryPlanner {
    /// Create a new query planner.
    pub fn new(schema: EntitySchema) -> Self {
        Self {
            schema,
            config: PlannerConfig::default(),
        }
    }

    /// Create a planner with custom configuration.
    pub fn with_config(schema: EntitySchema, config: PlannerConfig) -> Self {
        Self { schema, config }
    }

    /// The schema this planner resolves against.
    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Plan a query: bind `args` into the descriptor's conditions and
    /// attach ordering, limit and distinctness.
    pub fn plan(&self, descriptor: &QueryDescriptor, args: Vec<Value>) -> PlanResult<QueryPlan> {
        descriptor.check_arity(args.len())?;

        if let Some(limit) = descriptor.limit {
            if limit == 0 {
                return Err(PlanError::InvalidLimit(limit));
            }
        }

        let predicate = PredicateBuilder::new()
            .case_insensitive(self.config.case_insensitive_containing)
            .build(descriptor, args)?;

        let plan = QueryPlan {
            predicate,
            order: descriptor.order.clone(),
            limit: descriptor.limit,
            distinct: descriptor.distinct,
        };

        debug!(entity = %self.schema.entity, descriptor = %descriptor, "planned query");

        Ok(plan)
    }

    /// Render the plan a descriptor produces, for inspection.
    pub fn explain(&self, descriptor: &QueryDescriptor, args: Vec<Value>) -> PlanResult<String> {
        let plan = self.plan(descriptor, args)?;
        Ok(plan.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DescriptorBuilder, DescriptorError, Operator, SortDirection};
    use crate::schema::{FieldType, SchemaBuilder};
    use serde_json::json;

    fn planner() -> QueryPlanner {
        let schema = SchemaBuilder::new("product")
            .field("id", FieldType::Integer)
            .field("name", FieldType::Text)
            .field("price", FieldType::Decimal)
            .key("id")
            .build()
            .unwrap();
        QueryPlanner::new(schema)
    }

    #[test]
    fn test_plan_carries_descriptor_clauses() {
        let planner = planner();
        let descriptor = DescriptorBuilder::new()
            .filter("price", Operator::GreaterThan)
            .order_by("name", SortDirection::Ascending)
            .limit(5)
            .distinct()
            .build(planner.schema())
            .unwrap();

        let plan = planner.plan(&descriptor, vec![json!(10.0)]).unwrap();
        assert_eq!(plan.limit, Some(5));
        assert!(plan.distinct);
        assert_eq!(plan.order.len(), 1);
        assert_eq!(plan.condition_pairs(), vec![("price", Operator::GreaterThan)]);
    }

    #[test]
    fn test_plan_rejects_zero_limit() {
        let planner = planner();
        let descriptor = DescriptorBuilder::new()
            .limit(0)
            .build(planner.schema())
            .unwrap();

        let result = planner.plan(&descriptor, vec![]);
        assert!(matches!(result, Err(PlanError::InvalidLimit(0))));
    }

    #[test]
    fn test_plan_rejects_arity_mismatch_before_binding() {
        let planner = planner();
        let descriptor = DescriptorBuilder::new()
            .filter("name", Operator::Equals)
            .build(planner.schema())
            .unwrap();

        let result = planner.plan(&descriptor, vec![]);
        assert!(matches!(
            result,
            Err(PlanError::Descriptor(DescriptorError::ArityMismatch { .. }))
        ));
    }

    #[test]
    fn test_explain_renders_plan() {
        let planner = planner();
        let descriptor = DescriptorBuilder::new()
            .filter("name", Operator::Like)
            .build(planner.schema())
            .unwrap();

        let rendered = planner.explain(&descriptor, vec![json!("W%")]).unwrap();
        assert!(rendered.contains("Compare: name LIKE"));
    }
}

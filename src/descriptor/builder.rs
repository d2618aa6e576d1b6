//! Fluent builder for query descriptors.

use super::ast::{
    Combinator, Condition, Operator, QueryDescriptor, SortDirection, SortKey,
};
use super::error::{DescriptorError, DescriptorResult};
use crate::schema::EntitySchema;

/// Builder for [`QueryDescriptor`].
///
/// Validation is deferred to [`build`](DescriptorBuilder::build): unknown
/// fields and mixed combinators are reported there, so builder chains
/// stay infallible.
pub struct DescriptorBuilder {
    conditions: Vec<(String, Operator)>,
    joiners: Vec<Combinator>,
    order: Vec<(String, SortDirection)>,
    limit: Option<usize>,
    distinct: bool,
}

impl DescriptorBuilder {
    /// Start a new descriptor.
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            joiners: Vec::new(),
            order: Vec::new(),
            limit: None,
            distinct: false,
        }
    }

    /// Add a condition. Conditions added this way join with AND.
    pub fn filter(mut self, field: impl Into<String>, op: Operator) -> Self {
        self.conditions.push((field.into(), op));
        self
    }

    /// Add a condition joined to the previous ones with AND.
    pub fn and_filter(mut self, field: impl Into<String>, op: Operator) -> Self {
        self.joiners.push(Combinator::And);
        self.conditions.push((field.into(), op));
        self
    }

    /// Add a condition joined to the previous ones with OR.
    pub fn or_filter(mut self, field: impl Into<String>, op: Operator) -> Self {
        self.joiners.push(Combinator::Or);
        self.conditions.push((field.into(), op));
        self
    }

    /// Add an ordering key. Keys apply in the order they are added.
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order.push((field.into(), direction));
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request de-duplication by the entity's natural key.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Resolve fields against the schema and build the descriptor.
    pub fn build(self, schema: &EntitySchema) -> DescriptorResult<QueryDescriptor> {
        let mut combinator = None;
        for joiner in &self.joiners {
            match combinator {
                None => combinator = Some(*joiner),
                Some(existing) if existing != *joiner => {
                    return Err(DescriptorError::AmbiguousCombinator);
                }
                Some(_) => {}
            }
        }

        let conditions = self
            .conditions
            .into_iter()
            .map(|(name, op)| {
                let field = schema
                    .field(&name)
                    .ok_or_else(|| DescriptorError::UnknownField(name.clone()))?;
                Ok(Condition {
                    field: field.clone(),
                    op,
                })
            })
            .collect::<DescriptorResult<Vec<_>>>()?;

        let order = self
            .order
            .into_iter()
            .map(|(name, direction)| {
                let field = schema
                    .field(&name)
                    .ok_or_else(|| DescriptorError::UnknownField(name.clone()))?;
                Ok(SortKey {
                    field: field.clone(),
                    direction,
                })
            })
            .collect::<DescriptorResult<Vec<_>>>()?;

        Ok(QueryDescriptor {
            conditions,
            combinator: combinator.unwrap_or(Combinator::And),
            distinct: self.distinct,
            order,
            limit: self.limit,
        })
    }
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, SchemaBuilder};

    fn schema() -> EntitySchema {
        SchemaBuilder::new("product")
            .field("id", FieldType::Integer)
            .field("name", FieldType::Text)
            .field("description", FieldType::Text)
            .field("price", FieldType::Decimal)
            .key("id")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_simple() {
        let d = DescriptorBuilder::new()
            .filter("name", Operator::Equals)
            .build(&schema())
            .unwrap();

        assert_eq!(d.conditions.len(), 1);
        assert_eq!(d.combinator, Combinator::And);
        assert!(!d.distinct);
        assert_eq!(d.limit, None);
    }

    #[test]
    fn test_build_or_combination() {
        let d = DescriptorBuilder::new()
            .filter("name", Operator::Equals)
            .or_filter("description", Operator::Equals)
            .build(&schema())
            .unwrap();

        assert_eq!(d.combinator, Combinator::Or);
        assert_eq!(d.conditions.len(), 2);
    }

    #[test]
    fn test_build_rejects_mixed_combinators() {
        let result = DescriptorBuilder::new()
            .filter("name", Operator::Equals)
            .and_filter("description", Operator::Equals)
            .or_filter("price", Operator::GreaterThan)
            .build(&schema());

        assert!(matches!(result, Err(DescriptorError::AmbiguousCombinator)));
    }

    #[test]
    fn test_build_rejects_unknown_field() {
        let result = DescriptorBuilder::new()
            .filter("sku", Operator::Equals)
            .build(&schema());

        assert!(matches!(result, Err(DescriptorError::UnknownField(f)) if f == "sku"));
    }

    #[test]
    fn test_build_rejects_unknown_order_field() {
        let result = DescriptorBuilder::new()
            .order_by("sku", SortDirection::Ascending)
            .build(&schema());

        assert!(matches!(result, Err(DescriptorError::UnknownField(_))));
    }

    #[test]
    fn test_build_with_order_limit_distinct() {
        let d = DescriptorBuilder::new()
            .order_by("name", SortDirection::Ascending)
            .order_by("price", SortDirection::Descending)
            .limit(2)
            .distinct()
            .build(&schema())
            .unwrap();

        assert!(d.conditions.is_empty());
        assert_eq!(d.order.len(), 2);
        assert_eq!(d.limit, Some(2));
        assert!(d.distinct);
    }
}

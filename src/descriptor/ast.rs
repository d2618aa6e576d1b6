//! Descriptor types for findql queries.
//!
//! These are the structured equivalents of derived method names: the
//! pieces a name like `findByPriceBetween` decomposes into.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{DescriptorError, DescriptorResult};
use crate::schema::FieldSpec;

/// Comparison operators a condition can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Exact match.
    Equals,
    /// Strict greater-than, ordered per the field's semantic type.
    GreaterThan,
    /// Strict less-than, ordered per the field's semantic type.
    LessThan,
    /// Inclusive range [low, high].
    Between,
    /// Substring match.
    Containing,
    /// Wildcard pattern match (`%` and `_`), pattern passed through as-is.
    Like,
    /// Membership in a caller-supplied list.
    In,
}

impl Operator {
    /// Number of positional arguments this operator consumes.
    ///
    /// `In` takes a single list-valued argument, mirroring a derived
    /// method that accepts one collection parameter.
    pub fn arity(&self) -> usize {
        match self {
            Operator::Between => 2,
            _ => 1,
        }
    }

    /// The method-name suffix for this operator (empty for `Equals`).
    pub fn suffix(&self) -> &'static str {
        match self {
            Operator::Equals => "",
            Operator::GreaterThan => "GreaterThan",
            Operator::LessThan => "LessThan",
            Operator::Between => "Between",
            Operator::Containing => "Containing",
            Operator::Like => "Like",
            Operator::In => "In",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equals => write!(f, "="),
            Operator::GreaterThan => write!(f, ">"),
            Operator::LessThan => write!(f, "<"),
            Operator::Between => write!(f, "BETWEEN"),
            Operator::Containing => write!(f, "CONTAINING"),
            Operator::Like => write!(f, "LIKE"),
            Operator::In => write!(f, "IN"),
        }
    }
}

/// How multiple conditions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    /// All conditions must hold.
    And,
    /// At least one condition must hold.
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ASC"),
            SortDirection::Descending => write!(f, "DESC"),
        }
    }
}

/// One ordering key: resolved field plus direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: FieldSpec,
    pub direction: SortDirection,
}

/// One condition: resolved field plus operator. Argument values are
/// bound later, positionally, by the predicate builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: FieldSpec,
    pub op: Operator,
}

/// A complete, validated query descriptor.
///
/// Immutable once built. Field names have already been resolved against
/// the entity schema, so every later stage works with typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Conditions in declaration order.
    pub conditions: Vec<Condition>,
    /// How the conditions combine. Irrelevant for zero or one condition.
    pub combinator: Combinator,
    /// De-duplicate results by the entity's natural key.
    pub distinct: bool,
    /// Ordering keys in priority order.
    pub order: Vec<SortKey>,
    /// Cap on returned rows; `None` means unbounded.
    pub limit: Option<usize>,
}

impl QueryDescriptor {
    /// Total number of positional arguments the conditions consume.
    pub fn expected_arity(&self) -> usize {
        self.conditions.iter().map(|c| c.op.arity()).sum()
    }

    /// Validate the caller-supplied argument count against the
    /// operators' combined arity.
    pub fn check_arity(&self, supplied: usize) -> DescriptorResult<()> {
        let expected = self.expected_arity();
        if supplied != expected {
            return Err(DescriptorError::ArityMismatch { expected, supplied });
        }
        Ok(())
    }

    /// The (field name, operator) pairs in declaration order.
    pub fn condition_pairs(&self) -> Vec<(&str, Operator)> {
        self.conditions
            .iter()
            .map(|c| (c.field.name.as_str(), c.op))
            .collect()
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|c| format!("{} {}", c.field.name, c.op))
            .collect();
        let joiner = format!(" {} ", self.combinator);
        write!(f, "{}", parts.join(joiner.as_str()))?;
        if !self.order.is_empty() {
            let keys: Vec<String> = self
                .order
                .iter()
                .map(|k| format!("{} {}", k.field.name, k.direction))
                .collect();
            write!(f, " ORDER BY {}", keys.join(", "))?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        Ok(())
    }
}

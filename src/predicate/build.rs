//! Binding arguments into predicate trees.

use serde_json::Value;

use super::error::{PredicateError, PredicateResult};
use super::eval::{compare, decode, Scalar};
use super::node::PredicateNode;
use crate::descriptor::{Combinator, Condition, Operator, QueryDescriptor};
use crate::schema::FieldType;

/// Builds a [`PredicateNode`] tree from a descriptor and the caller's
/// positional argument values.
///
/// Arguments are consumed left to right, each condition taking as many
/// as its operator's arity. Range and type errors surface here, before
/// any storage access.
pub struct PredicateBuilder {
    fold_case: bool,
}

impl PredicateBuilder {
    /// Create a builder with default (case-sensitive) matching.
    pub fn new() -> Self {
        Self { fold_case: false }
    }

    /// Fold case when evaluating `Containing` conditions.
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.fold_case = value;
        self
    }

    /// Bind arguments and build the tree.
    pub fn build(
        &self,
        descriptor: &QueryDescriptor,
        args: Vec<Value>,
    ) -> PredicateResult<PredicateNode> {
        descriptor.check_arity(args.len())?;

        let mut remaining = args.into_iter();
        let mut leaves = Vec::with_capacity(descriptor.conditions.len());
        for condition in &descriptor.conditions {
            let bound: Vec<Value> = remaining.by_ref().take(condition.op.arity()).collect();
            self.validate(condition, &bound)?;
            leaves.push(PredicateNode::Compare {
                field: condition.field.clone(),
                op: condition.op,
                args: bound,
                fold_case: self.fold_case,
            });
        }

        Ok(match leaves.len() {
            0 => PredicateNode::always(),
            1 => leaves.remove(0),
            _ => match descriptor.combinator {
                Combinator::And => PredicateNode::All(leaves),
                Combinator::Or => PredicateNode::Any(leaves),
            },
        })
    }

    fn validate(&self, condition: &Condition, args: &[Value]) -> PredicateResult<()> {
        let field = &condition.field;
        match condition.op {
            Operator::Equals | Operator::GreaterThan | Operator::LessThan => {
                self.require_typed(field.field_type, &field.name, &args[0])?;
            }
            Operator::Between => {
                let low = self.require_typed(field.field_type, &field.name, &args[0])?;
                let high = self.require_typed(field.field_type, &field.name, &args[1])?;
                if compare(&low, &high) == Some(std::cmp::Ordering::Greater) {
                    return Err(PredicateError::InvalidRange {
                        field: field.name.clone(),
                        low: args[0].to_string(),
                        high: args[1].to_string(),
                    });
                }
            }
            Operator::Containing | Operator::Like => {
                if !args[0].is_string() {
                    return Err(PredicateError::InvalidArgument {
                        field: field.name.clone(),
                        expected: "string pattern".into(),
                        value: args[0].to_string(),
                    });
                }
            }
            Operator::In => {
                let Some(candidates) = args[0].as_array() else {
                    return Err(PredicateError::InvalidArgument {
                        field: field.name.clone(),
                        expected: "list".into(),
                        value: args[0].to_string(),
                    });
                };
                // An empty list is legal; it just matches nothing.
                for candidate in candidates {
                    self.require_typed(field.field_type, &field.name, candidate)?;
                }
            }
        }
        Ok(())
    }

    fn require_typed(
        &self,
        field_type: FieldType,
        field: &str,
        value: &Value,
    ) -> PredicateResult<Scalar> {
        decode(field_type, value).ok_or_else(|| PredicateError::InvalidArgument {
            field: field.to_string(),
            expected: field_type.name().to_string(),
            value: value.to_string(),
        })
    }
}

impl Default for PredicateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Predicate tree representation.

use std::fmt;

use serde_json::Value;

use super::eval;
use crate::descriptor::Operator;
use crate::schema::FieldSpec;
use crate::store::Record;

/// A node in a predicate tree.
///
/// Leaves compare one field against bound argument values; internal
/// nodes combine children. `All` with no children matches every record
/// (the predicate of a descriptor with no conditions).
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateNode {
    /// Compare a field against bound arguments.
    Compare {
        field: FieldSpec,
        op: Operator,
        args: Vec<Value>,
        /// Fold case for `Containing` matches. Baked in at build time.
        fold_case: bool,
    },

    /// Every child must hold.
    All(Vec<PredicateNode>),

    /// At least one child must hold.
    Any(Vec<PredicateNode>),
}

impl PredicateNode {
    /// The match-everything predicate.
    pub fn always() -> Self {
        PredicateNode::All(Vec::new())
    }

    /// Check whether a record satisfies this predicate.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            PredicateNode::Compare {
                field,
                op,
                args,
                fold_case,
            } => eval::compare_leaf(field, *op, args, *fold_case, record),
            PredicateNode::All(children) => children.iter().all(|c| c.matches(record)),
            PredicateNode::Any(children) => children.iter().any(|c| c.matches(record)),
        }
    }

    /// The (field name, operator) pairs of the leaves, in tree order.
    ///
    /// Re-derives the condition list of the descriptor this tree was
    /// built from.
    pub fn condition_pairs(&self) -> Vec<(&str, Operator)> {
        let mut pairs = Vec::new();
        self.collect_pairs(&mut pairs);
        pairs
    }

    fn collect_pairs<'a>(&'a self, pairs: &mut Vec<(&'a str, Operator)>) {
        match self {
            PredicateNode::Compare { field, op, .. } => {
                pairs.push((field.name.as_str(), *op));
            }
            PredicateNode::All(children) | PredicateNode::Any(children) => {
                for child in children {
                    child.collect_pairs(pairs);
                }
            }
        }
    }
}

impl fmt::Display for PredicateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_indent(f, 0)
    }
}

impl PredicateNode {
    pub(crate) fn format_indent(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            PredicateNode::Compare { field, op, args, .. } => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                writeln!(f, "{}Compare: {} {} [{}]", pad, field.name, op, rendered.join(", "))
            }
            PredicateNode::All(children) if children.is_empty() => {
                writeln!(f, "{}Always", pad)
            }
            PredicateNode::All(children) => {
                writeln!(f, "{}All", pad)?;
                for child in children {
                    child.format_indent(f, indent + 1)?;
                }
                Ok(())
            }
            PredicateNode::Any(children) => {
                writeln!(f, "{}Any", pad)?;
                for child in children {
                    child.format_indent(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

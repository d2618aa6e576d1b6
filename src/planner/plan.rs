//! Executable query plan representation.

use std::fmt;

use crate::descriptor::SortKey;
use crate::predicate::PredicateNode;

/// A complete, executable query plan.
///
/// Built once per call by the planner and never mutated afterwards; the
/// executor consumes it by reference.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Root of the predicate tree.
    pub predicate: PredicateNode,
    /// Ordering keys in priority order.
    pub order: Vec<SortKey>,
    /// Cap on returned rows; `None` means unbounded.
    pub limit: Option<usize>,
    /// De-duplicate by the entity's natural key.
    pub distinct: bool,
}

impl QueryPlan {
    /// The (field name, operator) pairs of the predicate leaves, in
    /// tree order. Mirrors the source descriptor's condition list.
    pub fn condition_pairs(&self) -> Vec<(&str, crate::descriptor::Operator)> {
        self.predicate.condition_pairs()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plan")?;
        if self.distinct {
            write!(f, ": distinct")?;
        }
        writeln!(f)?;
        if !self.order.is_empty() {
            let keys: Vec<String> = self
                .order
                .iter()
                .map(|k| format!("{} {}", k.field.name, k.direction))
                .collect();
            writeln!(f, "  Sort: [{}]", keys.join(", "))?;
        }
        if let Some(limit) = self.limit {
            writeln!(f, "  Limit: {}", limit)?;
        }
        self.predicate.format_indent(f, 1)
    }
}

//! Result shaping types.

use crate::store::Record;

/// How raw rows map to the caller's expected return.
///
/// The shape is explicit at every call site rather than an implicit
/// per-method convention, so sibling queries cannot silently differ in
/// their no-match behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// First match or a "no value" sentinel (`None`). Zero matches is
    /// not an error.
    SingleOrNull,
    /// Present/absent wrapper around the first match. Identical runtime
    /// behavior to [`SingleOrNull`](ResultShape::SingleOrNull); kept
    /// separate so call sites document which contract they inherit.
    SingleOptional,
    /// All matches in order; zero matches yields an empty list, never
    /// a sentinel.
    List,
}

/// Shaped output of a query execution.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Result of a single-row shape.
    Single(Option<Record>),
    /// Result of the list shape.
    Many(Vec<Record>),
}

impl QueryOutput {
    /// Unwrap into at most one record. For list output this takes the
    /// first row.
    pub fn into_single(self) -> Option<Record> {
        match self {
            QueryOutput::Single(record) => record,
            QueryOutput::Many(records) => records.into_iter().next(),
        }
    }

    /// Unwrap into a list. Single output becomes a zero- or one-element
    /// list.
    pub fn into_many(self) -> Vec<Record> {
        match self {
            QueryOutput::Single(Some(record)) => vec![record],
            QueryOutput::Single(None) => Vec::new(),
            QueryOutput::Many(records) => records,
        }
    }

    /// Number of records in the output.
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Single(Some(_)) => 1,
            QueryOutput::Single(None) => 0,
            QueryOutput::Many(records) => records.len(),
        }
    }

    /// Check if the output holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Record {
        json!({"name": "Widget"}).as_object().unwrap().clone()
    }

    #[test]
    fn test_into_single() {
        assert_eq!(QueryOutput::Single(None).into_single(), None);
        assert!(QueryOutput::Many(vec![record()]).into_single().is_some());
    }

    #[test]
    fn test_into_many() {
        assert!(QueryOutput::Single(None).into_many().is_empty());
        assert_eq!(QueryOutput::Single(Some(record())).into_many().len(), 1);
    }

    #[test]
    fn test_len() {
        assert_eq!(QueryOutput::Single(Some(record())).len(), 1);
        assert!(QueryOutput::Many(Vec::new()).is_empty());
    }
}

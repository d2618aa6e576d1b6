//! Predicate evaluation against raw records.
//!
//! Comparisons are driven by the field's semantic type: decimal fields
//! compare as exact decimals, timestamps chronologically, text
//! lexicographically. A record missing a field (or holding a value the
//! type cannot read) simply fails the leaf; evaluation never errors.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::descriptor::{Operator, SortDirection, SortKey};
use crate::schema::{FieldSpec, FieldType};
use crate::store::Record;

/// A record value decoded per its field's semantic type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Text(String),
    Decimal(Decimal),
    Integer(i64),
    Timestamp(DateTime<Utc>),
    Boolean(bool),
}

/// Decode a JSON value as the given field type.
pub(crate) fn decode(field_type: FieldType, value: &Value) -> Option<Scalar> {
    match field_type {
        FieldType::Text => value.as_str().map(|s| Scalar::Text(s.to_string())),
        FieldType::Decimal => decode_decimal(value).map(Scalar::Decimal),
        FieldType::Integer => value.as_i64().map(Scalar::Integer),
        FieldType::Timestamp => value
            .as_str()
            .and_then(decode_timestamp)
            .map(Scalar::Timestamp),
        FieldType::Boolean => value.as_bool().map(Scalar::Boolean),
    }
}

fn decode_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn decode_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .map(|dt| dt.and_utc())
                .ok()
        })
}

/// Compare two scalars of the same kind.
pub(crate) fn compare(a: &Scalar, b: &Scalar) -> Option<Ordering> {
    match (a, b) {
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
        (Scalar::Decimal(a), Scalar::Decimal(b)) => Some(a.cmp(b)),
        (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
        (Scalar::Timestamp(a), Scalar::Timestamp(b)) => Some(a.cmp(b)),
        (Scalar::Boolean(a), Scalar::Boolean(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Evaluate one comparison leaf against a record.
pub(crate) fn compare_leaf(
    field: &FieldSpec,
    op: Operator,
    args: &[Value],
    fold_case: bool,
    record: &Record,
) -> bool {
    let Some(value) = record.get(&field.name) else {
        return false;
    };
    let Some(first) = args.first() else {
        return false;
    };

    match op {
        Operator::Equals => {
            scalar_cmp(field.field_type, value, first).is_some_and(|o| o == Ordering::Equal)
        }
        Operator::GreaterThan => {
            scalar_cmp(field.field_type, value, first).is_some_and(|o| o == Ordering::Greater)
        }
        Operator::LessThan => {
            scalar_cmp(field.field_type, value, first).is_some_and(|o| o == Ordering::Less)
        }
        Operator::Between => {
            let Some(second) = args.get(1) else {
                return false;
            };
            let low = scalar_cmp(field.field_type, value, first);
            let high = scalar_cmp(field.field_type, value, second);
            low.is_some_and(|o| o != Ordering::Less) && high.is_some_and(|o| o != Ordering::Greater)
        }
        Operator::Containing => {
            let (Some(haystack), Some(needle)) = (value.as_str(), first.as_str()) else {
                return false;
            };
            if fold_case {
                haystack.to_lowercase().contains(&needle.to_lowercase())
            } else {
                haystack.contains(needle)
            }
        }
        Operator::Like => {
            let (Some(text), Some(pattern)) = (value.as_str(), first.as_str()) else {
                return false;
            };
            like_match(text, pattern)
        }
        Operator::In => {
            let Some(candidates) = first.as_array() else {
                return false;
            };
            candidates.iter().any(|candidate| {
                scalar_cmp(field.field_type, value, candidate)
                    .is_some_and(|o| o == Ordering::Equal)
            })
        }
    }
}

fn scalar_cmp(field_type: FieldType, value: &Value, arg: &Value) -> Option<Ordering> {
    let left = decode(field_type, value)?;
    let right = decode(field_type, arg)?;
    compare(&left, &right)
}

/// Wildcard pattern matching, the reference store's native dialect:
/// `%` matches any run of characters, `_` exactly one. Case-insensitive.
pub(crate) fn like_match(s: &str, pattern: &str) -> bool {
    let s_chars: Vec<char> = s.chars().collect();
    let p_chars: Vec<char> = pattern.chars().collect();
    match_like(&s_chars, &p_chars, 0, 0)
}

fn match_like(s: &[char], p: &[char], si: usize, pi: usize) -> bool {
    if pi >= p.len() {
        return si >= s.len();
    }

    match p[pi] {
        '%' => {
            for i in si..=s.len() {
                if match_like(s, p, i, pi + 1) {
                    return true;
                }
            }
            false
        }
        '_' => si < s.len() && match_like(s, p, si + 1, pi + 1),
        c => {
            si < s.len()
                && s[si].to_lowercase().eq(c.to_lowercase())
                && match_like(s, p, si + 1, pi + 1)
        }
    }
}

/// Sort records in place by the given keys, in priority order.
///
/// Values that are missing or unreadable for a key's type sort before
/// present ones. Shared by store backends that apply ordering
/// themselves.
pub fn sort_records(records: &mut [Record], keys: &[SortKey]) {
    records.sort_by(|a, b| {
        for key in keys {
            let left = a.get(&key.field.name).and_then(|v| decode(key.field.field_type, v));
            let right = b.get(&key.field.name).and_then(|v| decode(key.field.field_type, v));
            let ordering = match (left, right) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(l), Some(r)) => compare(&l, &r).unwrap_or(Ordering::Equal),
            };
            if ordering != Ordering::Equal {
                return match key.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                };
            }
        }
        Ordering::Equal
    });
}

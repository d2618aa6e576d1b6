//! Field types and specs for entity schemas.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic types a queryable field can have.
///
/// The semantic type decides how comparison operators order values:
/// decimals compare numerically, timestamps chronologically, text
/// lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Text/string data.
    Text,
    /// Exact decimal numbers (prices, quantities).
    Decimal,
    /// Integer numbers.
    Integer,
    /// Timestamps (stored as ISO 8601 strings).
    Timestamp,
    /// Boolean values.
    Boolean,
}

impl FieldType {
    /// Check if a JSON value can be read as this field type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldType::Text, Value::String(_)) => true,
            (FieldType::Decimal, Value::Number(_)) => true,
            (FieldType::Decimal, Value::String(s)) => Decimal::from_str(s).is_ok(),
            (FieldType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldType::Timestamp, Value::String(s)) => {
                chrono::DateTime::parse_from_rfc3339(s).is_ok()
                    || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
            }
            (FieldType::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }

    /// Get the display name for this type.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Decimal => "decimal",
            FieldType::Integer => "integer",
            FieldType::Timestamp => "timestamp",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A resolved field: name plus semantic type.
///
/// Descriptors carry `FieldSpec`s rather than bare names so that every
/// later stage knows how to compare the field's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in records.
    pub name: String,
    /// Semantic type.
    pub field_type: FieldType,
}

impl FieldSpec {
    /// Create a new field spec.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.field_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_matches() {
        assert!(FieldType::Text.matches(&json!("widget")));
        assert!(!FieldType::Text.matches(&json!(12)));

        assert!(FieldType::Decimal.matches(&json!(19.99)));
        assert!(FieldType::Decimal.matches(&json!("19.99")));
        assert!(!FieldType::Decimal.matches(&json!(true)));

        assert!(FieldType::Integer.matches(&json!(42)));
        assert!(!FieldType::Integer.matches(&json!(3.14)));

        assert!(FieldType::Timestamp.matches(&json!("2024-03-01T10:00:00Z")));
        assert!(FieldType::Timestamp.matches(&json!("2024-03-01T10:00:00")));
        assert!(!FieldType::Timestamp.matches(&json!("yesterday")));

        assert!(FieldType::Boolean.matches(&json!(false)));
    }

    #[test]
    fn test_field_spec_display() {
        let spec = FieldSpec::new("price", FieldType::Decimal);
        assert_eq!(spec.to_string(), "price decimal");
    }
}

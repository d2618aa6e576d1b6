//! Entity schema definition and validation.

use serde::{Deserialize, Serialize};

use super::types::{FieldSpec, FieldType};

/// Schema for a single entity kind.
///
/// Immutable once built; descriptors resolve field names against it and
/// the executor uses the key field to de-duplicate distinct results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity name (e.g. "product").
    pub entity: String,
    /// Queryable fields.
    pub fields: Vec<FieldSpec>,
    /// Natural-key field name.
    pub key: String,
}

impl EntitySchema {
    /// Get a field spec by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Get the natural-key field spec.
    pub fn key_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == self.key)
    }

    /// Validate the schema itself.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(&field.name) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        if !self.fields.iter().any(|f| f.name == self.key) {
            return Err(SchemaError::InvalidKey(self.key.clone()));
        }

        Ok(())
    }
}

/// Schema-related errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    #[error("key references unknown field: {0}")]
    InvalidKey(String),

    #[error("schema has no fields")]
    Empty,
}

/// Builder for entity schemas.
pub struct SchemaBuilder {
    entity: String,
    fields: Vec<FieldSpec>,
    key: Option<String>,
}

impl SchemaBuilder {
    /// Start building a schema for the named entity.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: Vec::new(),
            key: None,
        }
    }

    /// Add a field with name and type.
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldSpec::new(name, field_type));
        self
    }

    /// Set the natural-key field. Defaults to the first field.
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.key = Some(name.into());
        self
    }

    /// Build the schema.
    pub fn build(self) -> Result<EntitySchema, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let key = self
            .key
            .unwrap_or_else(|| self.fields[0].name.clone());
        let schema = EntitySchema {
            entity: self.entity,
            fields: self.fields,
            key,
        };
        schema.validate()?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_schema() -> EntitySchema {
        SchemaBuilder::new("product")
            .field("id", FieldType::Integer)
            .field("name", FieldType::Text)
            .field("description", FieldType::Text)
            .field("price", FieldType::Decimal)
            .field("date_created", FieldType::Timestamp)
            .key("id")
            .build()
            .unwrap()
    }

    #[test]
    fn test_schema_lookup() {
        let schema = product_schema();
        assert_eq!(schema.field("price").unwrap().field_type, FieldType::Decimal);
        assert!(schema.field("sku").is_none());
        assert_eq!(schema.key_field().unwrap().name, "id");
    }

    #[test]
    fn test_schema_duplicate_field() {
        let result = SchemaBuilder::new("bad")
            .field("name", FieldType::Text)
            .field("name", FieldType::Integer)
            .build();

        assert!(matches!(result, Err(SchemaError::DuplicateField(_))));
    }

    #[test]
    fn test_schema_invalid_key() {
        let result = SchemaBuilder::new("bad")
            .field("name", FieldType::Text)
            .key("id")
            .build();

        assert!(matches!(result, Err(SchemaError::InvalidKey(_))));
    }

    #[test]
    fn test_schema_default_key() {
        let schema = SchemaBuilder::new("note")
            .field("slug", FieldType::Text)
            .field("body", FieldType::Text)
            .build()
            .unwrap();

        assert_eq!(schema.key, "slug");
    }

    #[test]
    fn test_schema_serialization() {
        let schema = product_schema();
        let json = serde_json::to_string(&schema).unwrap();
        let back: EntitySchema = serde_json::from_str(&json).unwrap();

        assert_eq!(schema.entity, back.entity);
        assert_eq!(schema.fields.len(), back.fields.len());
        assert_eq!(schema.key, back.key);
    }
}

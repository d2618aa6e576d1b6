//! Entity schema definitions.
//!
//! A schema names the queryable fields of an entity and their semantic
//! types, and declares the natural key used for distinct de-duplication.

mod schema;
mod types;

pub use schema::{EntitySchema, SchemaBuilder, SchemaError};
pub use types::{FieldSpec, FieldType};

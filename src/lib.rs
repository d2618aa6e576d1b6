//! findql - A Derived-Query Engine
//!
//! This crate compiles repository-style query descriptors (or method
//! names such as `findByPriceGreaterThan`) into executable,
//! parameterized queries over a pluggable record store. Every query is
//! resolved once at call construction; there is no runtime reflection.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use findql::executor::ResultShape;
//! use findql::repository::Repository;
//! use findql::schema::{FieldType, SchemaBuilder};
//! use findql::store::{CollectionName, MemoryStore};
//! use serde_json::json;
//!
//! let schema = SchemaBuilder::new("product")
//!     .field("id", FieldType::Integer)
//!     .field("name", FieldType::Text)
//!     .field("price", FieldType::Decimal)
//!     .key("id")
//!     .build()
//!     .unwrap();
//!
//! let store = Arc::new(MemoryStore::new());
//! let products = CollectionName::new("products").unwrap();
//! store.create_collection(products.clone()).unwrap();
//! store
//!     .insert(
//!         &products,
//!         json!({"id": 1, "name": "Widget", "price": 9.99})
//!             .as_object()
//!             .unwrap()
//!             .clone(),
//!     )
//!     .unwrap();
//!
//! let repo = Repository::new(schema, products, store);
//! let cheap = repo
//!     .query("findByPriceLessThan", vec![json!(10)], ResultShape::List)
//!     .unwrap();
//! assert_eq!(cheap.len(), 1);
//! ```

pub mod descriptor;
pub mod executor;
pub mod planner;
pub mod predicate;
pub mod repository;
pub mod schema;
pub mod store;

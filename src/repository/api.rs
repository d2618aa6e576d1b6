//! Repository API - high-level interface for findql.
//!
//! A repository ties together an entity schema, a collection and a
//! record store, and answers derived queries given either a method name
//! or a prebuilt descriptor. It is the explicit replacement for a
//! framework-generated repository interface: every query is resolved at
//! call construction, never by reflection.

use serde_json::Value;
use thiserror::Error;

use crate::descriptor::{DescriptorError, DescriptorParser, QueryDescriptor};
use crate::executor::{ExecuteError, QueryExecutor, QueryOutput, ResultShape};
use crate::planner::{PlanError, PlannerConfig, QueryPlanner};
use crate::schema::{EntitySchema, SchemaError};
use crate::store::{CollectionName, RecordStore, StorageError};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("execution error: {0}")]
    Execute(#[from] ExecuteError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// A derived-query repository over one collection.
pub struct Repository<S> {
    collection: CollectionName,
    planner: QueryPlanner,
    executor: QueryExecutor<S>,
}

impl<S: RecordStore> Repository<S> {
    /// Create a repository for an entity backed by a store collection.
    pub fn new(schema: EntitySchema, collection: CollectionName, store: S) -> Self {
        Self {
            collection,
            planner: QueryPlanner::new(schema.clone()),
            executor: QueryExecutor::new(store, schema),
        }
    }

    /// Create a repository with custom planner configuration.
    pub fn with_config(
        schema: EntitySchema,
        collection: CollectionName,
        store: S,
        config: PlannerConfig,
    ) -> Self {
        Self {
            collection,
            planner: QueryPlanner::with_config(schema.clone(), config),
            executor: QueryExecutor::new(store, schema),
        }
    }

    /// The entity schema.
    pub fn schema(&self) -> &EntitySchema {
        self.planner.schema()
    }

    /// The collection this repository reads.
    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    /// Run a derived query by method name, e.g.
    /// `query("findByPriceBetween", vec![json!(10), json!(20)],
    /// ResultShape::List)`.
    pub fn query(
        &self,
        method: &str,
        args: Vec<Value>,
        shape: ResultShape,
    ) -> RepositoryResult<QueryOutput> {
        let descriptor = DescriptorParser::parse(self.planner.schema(), method)?;
        self.find(&descriptor, args, shape)
    }

    /// Run a prebuilt descriptor.
    pub fn find(
        &self,
        descriptor: &QueryDescriptor,
        args: Vec<Value>,
        shape: ResultShape,
    ) -> RepositoryResult<QueryOutput> {
        let plan = self.planner.plan(descriptor, args)?;
        Ok(self.executor.execute(&self.collection, &plan, shape)?)
    }

    /// Parse a method name without executing it.
    pub fn parse(&self, method: &str) -> RepositoryResult<QueryDescriptor> {
        Ok(DescriptorParser::parse(self.planner.schema(), method)?)
    }

    /// Render the plan a method name produces.
    pub fn explain(&self, method: &str, args: Vec<Value>) -> RepositoryResult<String> {
        let descriptor = DescriptorParser::parse(self.planner.schema(), method)?;
        Ok(self.planner.explain(&descriptor, args)?)
    }
}

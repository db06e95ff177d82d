//! Trait definitions
//!
//! This module defines the CRUD contract implemented by table accessors.

use crate::errors::AccessorError;
use crate::query_builder::{QueryFilter, QueryOptions};
use crate::record::Record;
use crate::value::FieldValue;
use async_trait::async_trait;
use sqlx::postgres::PgQueryResult;

/// Create, retrieve, update and delete rows of a single table
///
/// Every call is an independent request against the pool. Failures are
/// returned once, unchanged, with the attempted SQL attached.
#[async_trait]
pub trait CrudAccessor: Send + Sync {
    /// Insert a record, stamping `created` and `modified`
    async fn create(&self, data: Record) -> Result<PgQueryResult, AccessorError>;

    /// Fetch rows matching the options
    async fn retrieve(&self, options: QueryOptions) -> Result<Vec<Record>, AccessorError>;

    /// Fetch the row with the given id
    async fn retrieve_by_id(&self, id: FieldValue) -> Result<Option<Record>, AccessorError>;

    /// Update the row with the given id and return the updated rows
    async fn update(&self, id: FieldValue, data: Record) -> Result<Vec<Record>, AccessorError>;

    /// Delete the row with the given id
    async fn delete(&self, id: FieldValue) -> Result<PgQueryResult, AccessorError>;

    /// Count rows matching every filter
    async fn count(&self, filters: Vec<QueryFilter>) -> Result<i64, AccessorError>;
}

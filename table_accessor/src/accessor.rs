//! The table accessor
//!
//! Binds a pool and a validated table name into one value. Accessors are
//! cheap to clone and share the pool they were created with.

use crate::errors::AccessorError;
use crate::query_builder::{QueryFilter, QueryOptions, Statement};
use crate::record::Record;
use crate::traits::CrudAccessor;
use crate::validation::ValidatedTableName;
use crate::value::{bind_value, FieldValue};
use crate::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use config::AccessorConfig;
use sqlx::postgres::{PgArguments, PgQueryResult};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

#[derive(Clone)]
pub struct TableAccessor {
    pool: DbPool,
    table: ValidatedTableName,
    config: AccessorConfig,
}

impl std::fmt::Debug for TableAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableAccessor")
            .field("table", &self.table.as_str())
            .field("absent_fields", &self.config.absent_fields)
            .field("default_limit", &self.config.default_limit)
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

impl TableAccessor {
    /// Create an accessor with default options
    pub fn new(pool: DbPool, table: &str) -> Result<Self, AccessorError> {
        Self::with_config(pool, table, AccessorConfig::default())
    }

    /// Create an accessor with explicit options. Both the table name and the
    /// options are checked before the accessor exists.
    pub fn with_config(
        pool: DbPool,
        table: &str,
        config: AccessorConfig,
    ) -> Result<Self, AccessorError> {
        config.validate()?;
        Ok(Self {
            pool,
            table: ValidatedTableName::new(table)?,
            config,
        })
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn config(&self) -> &AccessorConfig {
        &self.config
    }

    /// Render the INSERT for `data` as of `now`
    pub fn build_create(
        &self,
        mut data: Record,
        now: DateTime<Utc>,
    ) -> Result<Statement, AccessorError> {
        data.stamp_created(now);
        Statement::insert(&self.table, &data, self.config.absent_fields)
    }

    pub fn build_retrieve(&self, options: &QueryOptions) -> Result<Statement, AccessorError> {
        Statement::select(&self.table, options, self.config.default_limit)
    }

    /// Render the UPDATE for `data` as of `now`
    pub fn build_update(
        &self,
        id: FieldValue,
        mut data: Record,
        now: DateTime<Utc>,
    ) -> Result<Statement, AccessorError> {
        data.prepare_update(now);
        Statement::update(&self.table, id, &data, self.config.absent_fields)
    }

    pub fn build_delete(&self, id: FieldValue) -> Statement {
        Statement::delete(&self.table, id)
    }

    pub fn build_count(&self, filters: &[QueryFilter]) -> Result<Statement, AccessorError> {
        Statement::count(&self.table, filters)
    }

    fn bind<'q>(&self, sql: &'q str, params: Vec<FieldValue>) -> Query<'q, Postgres, PgArguments> {
        tracing::debug!(
            table = %self.table,
            sql = %sql,
            params = params.len(),
            "executing statement"
        );

        params.into_iter().fold(sqlx::query(sql), bind_value)
    }

    fn failure(&self, sql: &str, err: sqlx::Error) -> AccessorError {
        tracing::warn!(table = %self.table, sql = %sql, error = %err, "statement failed");
        AccessorError::query_failure(sql, err)
    }

    async fn execute(&self, statement: Statement) -> Result<PgQueryResult, AccessorError> {
        let Statement { sql, params } = statement;
        self.bind(&sql, params)
            .execute(&self.pool)
            .await
            .map_err(|err| self.failure(&sql, err))
    }

    async fn fetch_all(&self, statement: Statement) -> Result<Vec<Record>, AccessorError> {
        let Statement { sql, params } = statement;
        let rows = self
            .bind(&sql, params)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| self.failure(&sql, err))?;

        rows.iter()
            .map(|row| Record::from_pg_row(row).map_err(|err| self.failure(&sql, err)))
            .collect()
    }
}

#[async_trait]
impl CrudAccessor for TableAccessor {
    async fn create(&self, data: Record) -> Result<PgQueryResult, AccessorError> {
        let statement = self.build_create(data, Utc::now())?;
        self.execute(statement).await
    }

    async fn retrieve(&self, options: QueryOptions) -> Result<Vec<Record>, AccessorError> {
        let statement = self.build_retrieve(&options)?;
        self.fetch_all(statement).await
    }

    async fn retrieve_by_id(&self, id: FieldValue) -> Result<Option<Record>, AccessorError> {
        let statement = Statement::select_by_id(&self.table, id);
        let mut rows = self.fetch_all(statement).await?;
        Ok(rows.pop())
    }

    async fn update(&self, id: FieldValue, data: Record) -> Result<Vec<Record>, AccessorError> {
        let statement = self.build_update(id, data, Utc::now())?;
        self.fetch_all(statement).await
    }

    async fn delete(&self, id: FieldValue) -> Result<PgQueryResult, AccessorError> {
        let statement = self.build_delete(id);
        self.execute(statement).await
    }

    async fn count(&self, filters: Vec<QueryFilter>) -> Result<i64, AccessorError> {
        let Statement { sql, params } = self.build_count(&filters)?;
        let row = self
            .bind(&sql, params)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| self.failure(&sql, err))?;

        row.try_get::<i64, _>("total")
            .map_err(|err| self.failure(&sql, err))
    }
}

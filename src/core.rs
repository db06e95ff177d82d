//! Core pgcrud functionality
//!
//! `PgCrud` owns the connection pool and hands out table accessors that
//! share it.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use table_accessor::{AccessorError, TableAccessor};

use crate::errors::PgCrudError;
use config::{AccessorConfig, AppConfig, DatabaseConfig};

/// Owner of the shared pool and the default accessor options
#[derive(Debug, Clone)]
pub struct PgCrud {
    pool: PgPool,
    accessor_config: AccessorConfig,
}

impl PgCrud {
    /// Create a new PgCrud with a lazily connected pool.
    ///
    /// No connection is opened here; connection failures surface on the
    /// first query as a query failure carrying the attempted SQL. Must be
    /// called from within a Tokio runtime.
    pub fn new(config: &DatabaseConfig) -> Result<Self, PgCrudError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut pool_options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect_lazy(&connection_string)?;
        crate::debug_log!(
            max_connections = config.max_connections,
            "created lazy connection pool"
        );

        Ok(Self {
            pool,
            accessor_config: AccessorConfig::default(),
        })
    }

    /// Create from a full application config, keeping its accessor options
    pub fn from_config(config: &AppConfig) -> Result<Self, PgCrudError> {
        let mut pgcrud = Self::new(&config.database)?;
        pgcrud.accessor_config = config.accessor.clone();
        Ok(pgcrud)
    }

    /// Wrap an existing pool
    pub fn with_pool(pool: PgPool, accessor_config: AccessorConfig) -> Self {
        Self {
            pool,
            accessor_config,
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn accessor_config(&self) -> &AccessorConfig {
        &self.accessor_config
    }

    /// Accessor for `table` using the default accessor options
    pub fn accessor(&self, table: &str) -> Result<TableAccessor, PgCrudError> {
        self.accessor_with(table, self.accessor_config.clone())
    }

    /// Accessor for `table` with its own options.
    ///
    /// A bad table name is `InvalidTable`; options that fail validation are
    /// `Config`.
    pub fn accessor_with(
        &self,
        table: &str,
        accessor_config: AccessorConfig,
    ) -> Result<TableAccessor, PgCrudError> {
        crate::trace_log!(table, "creating table accessor");
        TableAccessor::with_config(self.pool.clone(), table, accessor_config).map_err(|err| {
            match err {
                AccessorError::InvalidIdentifier(err) => PgCrudError::InvalidTable(err),
                AccessorError::InvalidConfig(err) => PgCrudError::Config(err),
                other => PgCrudError::Accessor(other),
            }
        })
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), PgCrudError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    /// Close every connection in the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

use crate::validation::ValidationError;
use config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessorError {
    /// The pool or the database rejected a statement. Carries the exact SQL
    /// that was attempted alongside the driver error.
    #[error("Query failed: {err} (sql: {sql})")]
    QueryFailure {
        sql: String,
        #[source]
        err: sqlx::Error,
    },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] ValidationError),

    #[error("Update has no fields to set")]
    EmptyUpdate,

    #[error("Invalid accessor options: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl AccessorError {
    pub fn query_failure(sql: impl Into<String>, err: sqlx::Error) -> Self {
        Self::QueryFailure {
            sql: sql.into(),
            err,
        }
    }

    /// SQL text of the failed statement, if the failure happened at execution time
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::QueryFailure { sql, .. } => Some(sql),
            Self::InvalidIdentifier(_) | Self::EmptyUpdate | Self::InvalidConfig(_) => None,
        }
    }

    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailure { .. })
    }
}

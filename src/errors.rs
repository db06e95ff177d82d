//! Error types for the pgcrud crate
//!
//! This module contains all error types that can be returned by pgcrud operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PgCrudError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Invalid table name: {0}")]
    InvalidTable(#[from] table_accessor::ValidationError),

    #[error(transparent)]
    Accessor(#[from] table_accessor::AccessorError),
}

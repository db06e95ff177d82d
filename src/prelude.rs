//! Convenience re-exports for common pgcrud usage
//!
//! # Example
//!
//! ```rust
//! use pgcrud::prelude::*;
//!
//! let filter = QueryFilter::eq("status", "active");
//! ```

pub use crate::core::PgCrud;
pub use crate::errors::PgCrudError;

pub use config::{AbsentFieldPolicy, AccessorConfig, AppConfig, DatabaseConfig};

pub use table_accessor::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;

pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;

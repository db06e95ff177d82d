//! # pgcrud
//!
//! Generic create/retrieve/update/delete for single PostgreSQL tables.
//! Records are untyped `field -> value` maps; every value travels as a
//! positional parameter and every identifier is validated before it is
//! written into SQL.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pgcrud::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "shop".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!     );
//!
//!     let pgcrud = PgCrud::new(&config)?;
//!     let customers = pgcrud.accessor("customers")?;
//!
//!     customers
//!         .create(record! { "name" => "Ann", "email" => "ann@example.com" })
//!         .await?;
//!
//!     let active = customers
//!         .retrieve(
//!             QueryOptions::new()
//!                 .filter(QueryFilter::eq("status", "active"))
//!                 .order_by("name", SortOrder::Asc)
//!                 .limit(10),
//!         )
//!         .await?;
//!     println!("{} active customers", active.len());
//!
//!     customers.update(FieldValue::from(42), record! { "name" => "Bob" }).await?;
//!     customers.delete(FieldValue::from(7)).await?;
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

pub use crate::core::PgCrud;
pub use crate::errors::PgCrudError;

pub use config::{AbsentFieldPolicy, AccessorConfig, AppConfig, DatabaseConfig};

pub use config;
pub use table_accessor;

pub use async_trait;
pub use sqlx;

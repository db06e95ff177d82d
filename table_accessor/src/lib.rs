//! Table Accessor - generic CRUD over a single PostgreSQL table
//!
//! This crate turns untyped [`Record`]s and structured [`QueryOptions`] into
//! parameterized SQL and runs it against a shared connection pool.

pub mod accessor;
pub mod errors;
pub mod prelude;
pub mod query_builder;
pub mod record;
pub mod traits;
pub mod validation;
pub mod value;

pub use accessor::TableAccessor;
pub use errors::AccessorError;
pub use query_builder::{QueryFilter, QueryOperator, QueryOptions, SortOrder, Statement};
pub use record::{Record, CREATED_FIELD, ID_FIELD, MODIFIED_FIELD};
pub use traits::CrudAccessor;
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};
pub use value::FieldValue;
pub use rust_decimal::Decimal;

pub use config::{AbsentFieldPolicy, AccessorConfig};

use sqlx::PgPool;

pub type DbPool = PgPool;

//! Convenience re-exports for common table-accessor usage

pub use crate::traits::CrudAccessor;
pub use crate::accessor::TableAccessor;
pub use crate::errors::AccessorError;
pub use crate::record::Record;
pub use crate::value::FieldValue;
pub use crate::query_builder::{QueryFilter, QueryOptions, SortOrder, Statement};
pub use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};
pub use crate::record;

pub use config::{AbsentFieldPolicy, AccessorConfig};

pub use sqlx::postgres::PgQueryResult;
pub use sqlx::PgPool;

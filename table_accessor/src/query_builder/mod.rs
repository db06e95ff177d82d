//! Query building
//!
//! Structured filters, sort keys and pagination for `retrieve`, plus the
//! renderers that turn every accessor operation into SQL text with
//! positional parameters.

pub mod filter;
pub mod options;
pub mod ordering;
pub mod sql_generation;
pub mod statement;


pub use filter::{ConditionValue, LogicalOperator, QueryCondition, QueryFilter, QueryOperator};
pub use options::QueryOptions;
pub use ordering::SortOrder;
pub use sql_generation::SqlGenerator;
pub use statement::Statement;

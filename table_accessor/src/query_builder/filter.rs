//! Filter expressions for `retrieve` and `count`
//!
//! Every value in a filter is bound as a positional parameter; field names
//! are validated identifiers.

use crate::value::FieldValue;

/// Query condition operators
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Eq,        // =
    Ne,        // !=
    Gt,        // >
    Gte,       // >=
    Lt,        // <
    Lte,       // <=
    Like,      // LIKE
    ILike,     // ILIKE (case insensitive)
    In,        // IN
    NotIn,     // NOT IN
    IsNull,    // IS NULL
    IsNotNull, // IS NOT NULL
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    None,
    Single(FieldValue),
    List(Vec<FieldValue>),
}

/// Single condition in WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCondition {
    pub field: String,
    pub operator: QueryOperator,
    pub value: ConditionValue,
}

/// Logical operators for combining conditions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// Query filter that can be nested
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    Condition(QueryCondition),
    Group {
        operator: LogicalOperator,
        filters: Vec<QueryFilter>,
    },
}

impl QueryFilter {
    /// Create a simple condition
    pub fn condition(field: &str, operator: QueryOperator, value: ConditionValue) -> Self {
        Self::Condition(QueryCondition {
            field: field.to_string(),
            operator,
            value,
        })
    }

    fn single(field: &str, operator: QueryOperator, value: impl Into<FieldValue>) -> Self {
        Self::condition(field, operator, ConditionValue::Single(value.into()))
    }

    fn list<V: Into<FieldValue>>(
        field: &str,
        operator: QueryOperator,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::condition(field, operator, ConditionValue::List(values))
    }

    /// Create AND group
    pub fn and(filters: Vec<QueryFilter>) -> Self {
        Self::Group {
            operator: LogicalOperator::And,
            filters,
        }
    }

    /// Create OR group
    pub fn or(filters: Vec<QueryFilter>) -> Self {
        Self::Group {
            operator: LogicalOperator::Or,
            filters,
        }
    }

    /// Equal condition. A NULL value renders `IS NULL`.
    pub fn eq(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::single(field, QueryOperator::Eq, value)
    }

    /// Not equal condition. A NULL value renders `IS NOT NULL`.
    pub fn ne(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::single(field, QueryOperator::Ne, value)
    }

    pub fn gt(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::single(field, QueryOperator::Gt, value)
    }

    pub fn gte(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::single(field, QueryOperator::Gte, value)
    }

    pub fn lt(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::single(field, QueryOperator::Lt, value)
    }

    pub fn lte(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::single(field, QueryOperator::Lte, value)
    }

    pub fn like(field: &str, pattern: &str) -> Self {
        Self::single(field, QueryOperator::Like, pattern)
    }

    /// ILIKE condition (case insensitive)
    pub fn ilike(field: &str, pattern: &str) -> Self {
        Self::single(field, QueryOperator::ILike, pattern)
    }

    /// IN condition. An empty list matches nothing.
    pub fn in_values<V: Into<FieldValue>>(field: &str, values: impl IntoIterator<Item = V>) -> Self {
        Self::list(field, QueryOperator::In, values)
    }

    /// NOT IN condition. An empty list matches everything.
    pub fn not_in_values<V: Into<FieldValue>>(
        field: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::list(field, QueryOperator::NotIn, values)
    }

    pub fn is_null(field: &str) -> Self {
        Self::condition(field, QueryOperator::IsNull, ConditionValue::None)
    }

    pub fn is_not_null(field: &str) -> Self {
        Self::condition(field, QueryOperator::IsNotNull, ConditionValue::None)
    }
}

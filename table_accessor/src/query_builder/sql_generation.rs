//! Clause rendering shared by the statement builders

use crate::query_builder::filter::{
    ConditionValue, LogicalOperator, QueryCondition, QueryFilter, QueryOperator,
};
use crate::query_builder::ordering::SortOrder;
use crate::validation::{ValidatedFieldName, ValidationError};
use crate::value::FieldValue;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Append `value` to `values` and return its placeholder
    pub(crate) fn push_param(values: &mut Vec<FieldValue>, value: FieldValue) -> String {
        values.push(value);
        format!("${}", values.len())
    }

    /// Build WHERE clause from conditions, numbering placeholders after
    /// whatever is already in `values`
    pub fn build_where_clause(
        conditions: &[QueryFilter],
        values: &mut Vec<FieldValue>,
    ) -> Result<String, ValidationError> {
        if conditions.is_empty() {
            return Ok(String::new());
        }

        let conditions_sql = conditions
            .iter()
            .map(|condition| Self::build_condition_sql(condition, values))
            .collect::<Result<Vec<_>, _>>()?
            .join(" AND ");

        Ok(format!("WHERE {}", conditions_sql))
    }

    fn build_condition_sql(
        filter: &QueryFilter,
        values: &mut Vec<FieldValue>,
    ) -> Result<String, ValidationError> {
        match filter {
            QueryFilter::Condition(condition) => Self::build_single_condition_sql(condition, values),
            QueryFilter::Group { operator, filters } => {
                if filters.is_empty() {
                    return Ok(match operator {
                        LogicalOperator::And => "1=1".to_string(),
                        LogicalOperator::Or => "1=0".to_string(),
                    });
                }

                let operator_str = match operator {
                    LogicalOperator::And => " AND ",
                    LogicalOperator::Or => " OR ",
                };

                let group_conditions = filters
                    .iter()
                    .map(|f| Self::build_condition_sql(f, values))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(operator_str);

                Ok(format!("({})", group_conditions))
            }
        }
    }

    fn build_single_condition_sql(
        condition: &QueryCondition,
        values: &mut Vec<FieldValue>,
    ) -> Result<String, ValidationError> {
        let field = ValidatedFieldName::new(&condition.field)?;

        let sql = match (&condition.operator, &condition.value) {
            (QueryOperator::IsNull, _) => format!("{} IS NULL", field),
            (QueryOperator::IsNotNull, _) => format!("{} IS NOT NULL", field),
            (QueryOperator::Eq, ConditionValue::Single(FieldValue::Null)) => {
                format!("{} IS NULL", field)
            }
            (QueryOperator::Ne, ConditionValue::Single(FieldValue::Null)) => {
                format!("{} IS NOT NULL", field)
            }
            (QueryOperator::In, value) => Self::build_list_sql(&field, false, value, values),
            (QueryOperator::NotIn, value) => Self::build_list_sql(&field, true, value, values),
            (operator, ConditionValue::Single(value)) if !value.is_null() => {
                match Self::comparison_symbol(operator) {
                    Some(symbol) => {
                        let param = Self::push_param(values, value.clone());
                        format!("{} {} {}", field, symbol, param)
                    }
                    None => "1=0".to_string(),
                }
            }
            // Ordering and pattern comparisons against NULL or a list never match
            _ => "1=0".to_string(),
        };

        Ok(sql)
    }

    fn comparison_symbol(operator: &QueryOperator) -> Option<&'static str> {
        match operator {
            QueryOperator::Eq => Some("="),
            QueryOperator::Ne => Some("!="),
            QueryOperator::Gt => Some(">"),
            QueryOperator::Gte => Some(">="),
            QueryOperator::Lt => Some("<"),
            QueryOperator::Lte => Some("<="),
            QueryOperator::Like => Some("LIKE"),
            QueryOperator::ILike => Some("ILIKE"),
            QueryOperator::In
            | QueryOperator::NotIn
            | QueryOperator::IsNull
            | QueryOperator::IsNotNull => None,
        }
    }

    /// Render IN / NOT IN. NULL items are pulled out of the list and
    /// expressed as an IS NULL / IS NOT NULL test next to it.
    fn build_list_sql(
        field: &ValidatedFieldName,
        negated: bool,
        value: &ConditionValue,
        values: &mut Vec<FieldValue>,
    ) -> String {
        let items: &[FieldValue] = match value {
            ConditionValue::List(items) => items,
            ConditionValue::Single(item) => std::slice::from_ref(item),
            ConditionValue::None => &[],
        };

        let (nulls, present): (Vec<&FieldValue>, Vec<&FieldValue>) =
            items.iter().partition(|item| item.is_null());

        let (keyword, null_test, joiner, when_empty) = if negated {
            ("NOT IN", "IS NOT NULL", "AND", "1=1")
        } else {
            ("IN", "IS NULL", "OR", "1=0")
        };

        if present.is_empty() {
            return if nulls.is_empty() {
                when_empty.to_string()
            } else {
                format!("{} {}", field, null_test)
            };
        }

        let placeholders: Vec<String> = present
            .into_iter()
            .map(|item| Self::push_param(values, item.clone()))
            .collect();
        let membership = format!("{} {} ({})", field, keyword, placeholders.join(", "));

        if nulls.is_empty() {
            membership
        } else {
            format!("({} {} {} {})", membership, joiner, field, null_test)
        }
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(order_by: &[(String, SortOrder)]) -> Result<String, ValidationError> {
        if order_by.is_empty() {
            return Ok(String::new());
        }

        let order_items = order_by
            .iter()
            .map(|(field, order)| {
                ValidatedFieldName::new(field).map(|f| format!("{} {}", f, order.to_sql()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!("ORDER BY {}", order_items.join(", ")))
    }

    /// Build LIMIT/OFFSET clause
    pub fn build_limit_clause(limit: i64, offset: i64) -> String {
        format!("LIMIT {} OFFSET {}", limit, offset)
    }
}

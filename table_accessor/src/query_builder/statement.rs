//! Complete statements for each accessor operation

use crate::errors::AccessorError;
use crate::query_builder::filter::QueryFilter;
use crate::query_builder::options::QueryOptions;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::record::{Record, ID_FIELD};
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use crate::value::FieldValue;
use config::AbsentFieldPolicy;

/// SQL text plus the values for its positional placeholders, in order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<FieldValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Number of `$n` placeholders the statement expects
    pub fn placeholder_count(&self) -> usize {
        self.params.len()
    }

    /// `INSERT INTO <t> (c1, …) VALUES ($1, …);`
    ///
    /// A record with no present fields inserts a row of column defaults.
    pub fn insert(
        table: &ValidatedTableName,
        record: &Record,
        policy: AbsentFieldPolicy,
    ) -> Result<Self, AccessorError> {
        let (columns, params) = record.present_columns(policy);

        if columns.is_empty() {
            return Ok(Self::new(
                format!("INSERT INTO {} DEFAULT VALUES;", table),
                params,
            ));
        }

        let columns = validated_columns(&columns)?;
        let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("${}", i)).collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({});",
            table,
            columns.join(", "),
            placeholders.join(", ")
        );

        Ok(Self::new(sql, params))
    }

    /// `SELECT * FROM <t>[ WHERE …][ ORDER BY …] LIMIT <n> OFFSET <m>;`
    pub fn select(
        table: &ValidatedTableName,
        options: &QueryOptions,
        default_limit: i64,
    ) -> Result<Self, AccessorError> {
        let mut params = Vec::new();
        let where_clause = SqlGenerator::build_where_clause(&options.find, &mut params)?;
        let order_clause = SqlGenerator::build_order_clause(&options.sort)?;
        let limit_clause = SqlGenerator::build_limit_clause(
            options.limit.unwrap_or(default_limit),
            options.skip.unwrap_or(0),
        );

        let base = format!("SELECT * FROM {}", table);
        let sql = [base, where_clause, order_clause, limit_clause]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self::new(format!("{};", sql), params))
    }

    /// `SELECT * FROM <t> WHERE id = $1 LIMIT 1;`
    pub fn select_by_id(table: &ValidatedTableName, id: FieldValue) -> Self {
        Self::new(
            format!("SELECT * FROM {} WHERE {} = $1 LIMIT 1;", table, ID_FIELD),
            vec![id],
        )
    }

    /// `UPDATE <t> SET c1 = $1, … WHERE id = $N RETURNING *;`
    ///
    /// The id is bound after every SET value.
    pub fn update(
        table: &ValidatedTableName,
        id: FieldValue,
        record: &Record,
        policy: AbsentFieldPolicy,
    ) -> Result<Self, AccessorError> {
        let (columns, mut params) = record.present_columns(policy);
        if columns.is_empty() {
            return Err(AccessorError::EmptyUpdate);
        }

        let columns = validated_columns(&columns)?;
        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ${}", column, i + 1))
            .collect();

        let id_param = SqlGenerator::push_param(&mut params, id);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {} RETURNING *;",
            table,
            assignments.join(", "),
            ID_FIELD,
            id_param
        );

        Ok(Self::new(sql, params))
    }

    /// `DELETE FROM <t> WHERE id = $1;`
    pub fn delete(table: &ValidatedTableName, id: FieldValue) -> Self {
        Self::new(
            format!("DELETE FROM {} WHERE {} = $1;", table, ID_FIELD),
            vec![id],
        )
    }

    /// `SELECT COUNT(*) AS total FROM <t>[ WHERE …];`
    pub fn count(
        table: &ValidatedTableName,
        filters: &[QueryFilter],
    ) -> Result<Self, AccessorError> {
        let mut params = Vec::new();
        let where_clause = SqlGenerator::build_where_clause(filters, &mut params)?;

        let sql = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS total FROM {};", table)
        } else {
            format!("SELECT COUNT(*) AS total FROM {} {};", table, where_clause)
        };

        Ok(Self::new(sql, params))
    }
}

fn validated_columns(columns: &[&str]) -> Result<Vec<String>, AccessorError> {
    columns
        .iter()
        .map(|column| {
            ValidatedFieldName::new(column)
                .map(ValidatedFieldName::into_string)
                .map_err(AccessorError::from)
        })
        .collect()
}

//! Untyped table rows

use crate::value::{decode_column, FieldValue};
use chrono::{DateTime, Utc};
use config::AbsentFieldPolicy;
use indexmap::IndexMap;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row};

/// Column stamped once when a record is created
pub const CREATED_FIELD: &str = "created";
/// Column stamped on every create and update
pub const MODIFIED_FIELD: &str = "modified";
/// Primary key column used by update, delete and lookups
pub const ID_FIELD: &str = "id";

/// An insertion-ordered mapping from column name to value.
///
/// Re-inserting an existing key keeps its original position, so the column
/// order of rendered statements follows the order fields were first set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Remove a field, keeping the order of the remaining ones
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.shift_remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Build a record from a JSON object. Returns `None` for any other JSON shape.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(map) => Some(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from_json(v)))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Stamp `created` and `modified` for a new row, overwriting caller values
    pub fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.insert(CREATED_FIELD, now);
        self.insert(MODIFIED_FIELD, now);
    }

    /// Drop the fields an update may never touch and stamp `modified`
    pub fn prepare_update(&mut self, now: DateTime<Utc>) {
        self.remove(CREATED_FIELD);
        self.remove(ID_FIELD);
        self.insert(MODIFIED_FIELD, now);
    }

    /// Split into parallel column/value sequences, skipping absent values
    pub fn present_columns(&self, policy: AbsentFieldPolicy) -> (Vec<&str>, Vec<FieldValue>) {
        self.fields
            .iter()
            .filter(|(_, value)| !value.is_absent(policy))
            .map(|(field, value)| (field.as_str(), value.clone()))
            .unzip()
    }

    /// Decode a result row into a record, column by column
    pub fn from_pg_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let mut record = Record::new();
        for (index, column) in row.columns().iter().enumerate() {
            record.insert(column.name(), decode_column(row, index)?);
        }
        Ok(record)
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, FieldValue);
    type IntoIter = indexmap::map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Build a [`Record`] from `field => value` pairs
#[macro_export]
macro_rules! record {
    () => { $crate::Record::new() };
    ($($field:expr => $value:expr),+ $(,)?) => {
        $crate::Record::new()$(.with($field, $value))+
    };
}

//! Scalar values stored in a [`Record`](crate::Record)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use config::AbsentFieldPolicy;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow, PgTypeKind};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row, TypeInfo};
use uuid::Uuid;

/// A single column value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Uuid(Uuid),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// JavaScript-style truthiness: NULL, false, 0, NaN and "" are falsy
    pub fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Bool(b) => !b,
            FieldValue::Int(i) => *i == 0,
            FieldValue::Float(f) => *f == 0.0 || f.is_nan(),
            FieldValue::Decimal(d) => d.is_zero(),
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Json(v) => v.is_null(),
            FieldValue::Timestamp(_)
            | FieldValue::Date(_)
            | FieldValue::Time(_)
            | FieldValue::Uuid(_)
            | FieldValue::Bytes(_) => false,
        }
    }

    /// Whether the value is left out of INSERT/UPDATE column lists under `policy`
    pub fn is_absent(&self, policy: AbsentFieldPolicy) -> bool {
        match policy {
            AbsentFieldPolicy::NullOnly => self.is_null(),
            AbsentFieldPolicy::Falsy => self.is_falsy(),
        }
    }

    /// Map a JSON value onto the closest scalar; arrays and objects stay JSON
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => n
                    .as_f64()
                    .map(FieldValue::Float)
                    .unwrap_or_else(|| FieldValue::Text(n.to_string())),
            },
            serde_json::Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Json(other),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::Timestamp(value.and_utc())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveTime> for FieldValue {
    fn from(value: NaiveTime) -> Self {
        FieldValue::Time(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::Bytes(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::from_json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Pick the typed value a string stands for.
///
/// Strings are bound with a concrete parameter type, so a plain TEXT
/// parameter is rejected by date, uuid and timestamptz columns. RFC3339
/// timestamps, hyphenated UUIDs and `YYYY-MM-DD` dates are bound as those
/// types instead; anything else stays text.
pub(crate) fn refine_text(text: String) -> FieldValue {
    if let Ok(ts) = DateTime::parse_from_rfc3339(&text) {
        return FieldValue::Timestamp(ts.with_timezone(&Utc));
    }
    if text.len() == 36 {
        if let Ok(uuid) = Uuid::parse_str(&text) {
            return FieldValue::Uuid(uuid);
        }
    }
    if text.len() == 10 {
        if let Ok(date) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
            return FieldValue::Date(date);
        }
    }
    FieldValue::Text(text)
}

/// Bind a value as the next positional parameter of `query`
pub(crate) fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: FieldValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        FieldValue::Null => query.bind(Option::<String>::None),
        FieldValue::Bool(b) => query.bind(b),
        FieldValue::Int(i) => match i32::try_from(i) {
            Ok(small) => query.bind(small),
            Err(_) => query.bind(i),
        },
        FieldValue::Float(f) => query.bind(f),
        FieldValue::Decimal(d) => query.bind(d),
        FieldValue::Text(s) => match refine_text(s) {
            FieldValue::Text(s) => query.bind(s),
            refined => bind_value(query, refined),
        },
        FieldValue::Timestamp(ts) => query.bind(ts),
        FieldValue::Date(date) => query.bind(date),
        FieldValue::Time(time) => query.bind(time),
        FieldValue::Uuid(uuid) => query.bind(uuid),
        FieldValue::Bytes(bytes) => query.bind(bytes),
        FieldValue::Json(json) => query.bind(sqlx::types::Json(json)),
    }
}

fn decode_array<T>(row: &PgRow, index: usize) -> Result<Option<FieldValue>, sqlx::Error>
where
    T: Serialize,
    Vec<T>: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    Ok(row
        .try_get::<Option<Vec<T>>, _>(index)?
        .map(|items| FieldValue::Json(serde_json::json!(items))))
}

/// Decode column `index` of `row` according to its Postgres type.
///
/// Enum and `citext` columns are read as text. Arrays of scalars come back
/// as JSON arrays. Anything without a lossless mapping is a decode error.
pub(crate) fn decode_column(row: &PgRow, index: usize) -> Result<FieldValue, sqlx::Error> {
    let column = row.column(index);
    let type_info = column.type_info();
    let value = match type_info.name() {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(FieldValue::Bool),
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(FieldValue::from),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(FieldValue::from),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(FieldValue::Int),
        "FLOAT4" => row.try_get::<Option<f32>, _>(index)?.map(FieldValue::from),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(FieldValue::Float),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)?
            .map(FieldValue::Decimal),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(index)?.map(FieldValue::Text)
        }
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(FieldValue::Timestamp),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(FieldValue::from),
        "DATE" => row.try_get::<Option<NaiveDate>, _>(index)?.map(FieldValue::Date),
        "TIME" => row.try_get::<Option<NaiveTime>, _>(index)?.map(FieldValue::Time),
        "UUID" => row.try_get::<Option<Uuid>, _>(index)?.map(FieldValue::Uuid),
        "BYTEA" => row.try_get::<Option<Vec<u8>>, _>(index)?.map(FieldValue::Bytes),
        "JSON" | "JSONB" => row
            .try_get::<Option<serde_json::Value>, _>(index)?
            .map(FieldValue::Json),
        "BOOL[]" => decode_array::<bool>(row, index)?,
        "INT2[]" => decode_array::<i16>(row, index)?,
        "INT4[]" => decode_array::<i32>(row, index)?,
        "INT8[]" => decode_array::<i64>(row, index)?,
        "FLOAT4[]" => decode_array::<f32>(row, index)?,
        "FLOAT8[]" => decode_array::<f64>(row, index)?,
        "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => decode_array::<String>(row, index)?,
        "UUID[]" => decode_array::<Uuid>(row, index)?,
        "citext" => row
            .try_get_unchecked::<Option<String>, _>(index)?
            .map(FieldValue::Text),
        _ if matches!(type_info.kind(), PgTypeKind::Enum(_)) => row
            .try_get_unchecked::<Option<String>, _>(index)?
            .map(FieldValue::Text),
        other => {
            return Err(sqlx::Error::ColumnDecode {
                index: column.name().to_string(),
                source: format!("unsupported column type {}", other).into(),
            })
        }
    };

    Ok(value.unwrap_or(FieldValue::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        let falsy = [
            FieldValue::Null,
            FieldValue::Bool(false),
            FieldValue::Int(0),
            FieldValue::Float(0.0),
            FieldValue::Float(f64::NAN),
            FieldValue::Text(String::new()),
            FieldValue::Json(serde_json::Value::Null),
        ];
        for value in falsy {
            assert!(value.is_falsy(), "{:?} should be falsy", value);
            assert!(value.is_absent(AbsentFieldPolicy::Falsy));
        }

        let truthy = [
            FieldValue::Bool(true),
            FieldValue::Int(-1),
            FieldValue::Text("0".to_string()),
            FieldValue::Timestamp(Utc::now()),
            FieldValue::Json(json!([])),
        ];
        for value in truthy {
            assert!(!value.is_falsy(), "{:?} should be truthy", value);
        }
    }

    #[test]
    fn test_null_only_policy_keeps_zero_and_false() {
        assert!(FieldValue::Null.is_absent(AbsentFieldPolicy::NullOnly));
        assert!(!FieldValue::Int(0).is_absent(AbsentFieldPolicy::NullOnly));
        assert!(!FieldValue::Bool(false).is_absent(AbsentFieldPolicy::NullOnly));
        assert!(!FieldValue::from("").is_absent(AbsentFieldPolicy::NullOnly));
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(FieldValue::from_json(json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from_json(json!(42)), FieldValue::Int(42));
        assert_eq!(FieldValue::from_json(json!(1.5)), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from_json(json!("hi")), FieldValue::from("hi"));
        assert_eq!(
            FieldValue::from_json(json!({"a": 1})),
            FieldValue::Json(json!({"a": 1}))
        );
        assert_eq!(
            FieldValue::from_json(json!(u64::MAX)),
            FieldValue::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn test_strings_refine_to_typed_values() {
        assert_eq!(
            refine_text("2024-01-02".to_string()),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
        assert_eq!(
            refine_text("2024-05-01T12:00:00+02:00".to_string()),
            FieldValue::Timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
        let uuid = Uuid::new_v4();
        assert_eq!(refine_text(uuid.to_string()), FieldValue::Uuid(uuid));
    }

    #[test]
    fn test_plain_strings_stay_text() {
        let plain = [
            "Ann",
            "",
            "2024-13-40",
            "12345",
            "9.99",
            // 32 hex digits without hyphens, e.g. an md5 digest
            "d41d8cd98f00b204e9800998ecf8427e",
        ];
        for text in plain {
            assert_eq!(refine_text(text.to_string()), FieldValue::from(text));
        }
    }

    #[test]
    fn test_dates_and_decimals_are_truthy_unless_zero() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert!(!FieldValue::from(date).is_falsy());
        assert!(!FieldValue::from(Vec::<u8>::new()).is_falsy());
        assert!(FieldValue::Decimal(Decimal::ZERO).is_falsy());
        assert!(!FieldValue::Decimal(Decimal::new(999, 2)).is_falsy());
        assert_eq!(FieldValue::from(date).as_date(), Some(date));
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let value = serde_json::to_value(vec![
            FieldValue::Null,
            FieldValue::Int(3),
            FieldValue::from("a"),
            FieldValue::Bool(true),
        ])
        .unwrap();
        assert_eq!(value, json!([null, 3, "a", true]));
    }
}

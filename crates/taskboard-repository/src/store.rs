//! Store handle abstraction.
//!
//! Repositories talk to the relational store only through [`SqlStore`]:
//! statement text plus positional [`SqlValue`] parameters in, [`Record`]s
//! out. [`crate::DatabasePool`] is the PostgreSQL implementation; tests
//! substitute a scripted mock.

use async_trait::async_trait;
use std::fmt;
use taskboard_core::{Interface, TaskboardError};
use thiserror::Error;

/// A positional statement parameter or a decoded column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Text(String),
}

impl SqlValue {
    /// Short name of the value's kind, used in scan errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BOOL",
            Self::Int(_) => "INT4",
            Self::BigInt(_) => "INT8",
            Self::Text(_) => "TEXT",
        }
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Conversion from a column value into a Rust field.
///
/// Returns `None` when the value cannot represent `Self`.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: &SqlValue) -> Option<Self>;
}

impl FromSqlValue for bool {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromSqlValue for i32 {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Int(v) => Some(*v),
            SqlValue::BigInt(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Int(v) => Some(i64::from(*v)),
            SqlValue::BigInt(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Null => Some(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}

/// One result row as ordered `(column, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    columns: Vec<(String, SqlValue)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record with room for `capacity` columns.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Appends a column, builder style.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Appends a column.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Returns the raw value of `column`, if present.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Scans `column` into `T`.
    ///
    /// A missing column or a value of the wrong kind is a
    /// [`StoreError::Column`]; nothing is defaulted.
    pub fn get<T: FromSqlValue>(&self, column: &str) -> Result<T, StoreError> {
        let value = self
            .value(column)
            .ok_or_else(|| StoreError::column(column, "column not present in result"))?;

        T::from_sql_value(value).ok_or_else(|| {
            StoreError::column(
                column,
                format!(
                    "cannot scan {} into {}",
                    value.kind(),
                    std::any::type_name::<T>()
                ),
            )
        })
    }

    /// Iterates over column names in result order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the record has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Failure reported by a [`SqlStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The statement matched zero rows.
    #[error("no rows in result set")]
    NoRows,

    /// A column could not be scanned into its field.
    #[error("column `{column}`: {message}")]
    Column { column: String, message: String },

    /// Any other driver failure.
    #[error(transparent)]
    Driver(sqlx::Error),
}

impl StoreError {
    /// Creates a scan failure for `column`.
    #[must_use]
    pub fn column(column: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Column {
            column: column.into(),
            message: message.to_string(),
        }
    }

    /// Returns true for the store's not-found signal.
    #[must_use]
    pub const fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }

    /// Classifies a failed lookup of `resource_type` by `id`.
    ///
    /// [`StoreError::NoRows`] becomes `NotFound`; everything else is a
    /// `Storage` error carrying this error as its cause.
    #[must_use]
    pub fn into_lookup_error(self, resource_type: &'static str, id: impl fmt::Display) -> TaskboardError {
        match self {
            Self::NoRows => TaskboardError::not_found(resource_type, id),
            other => TaskboardError::storage(other),
        }
    }

    /// Classifies a failed `INSERT ... RETURNING id` into `table`.
    ///
    /// An insert that returns no row is never reported as success.
    #[must_use]
    pub fn into_insert_error(self, table: &'static str) -> TaskboardError {
        match self {
            Self::NoRows => TaskboardError::storage(anyhow::anyhow!(
                "insert into {table} returned no identifier"
            )),
            other => TaskboardError::storage(other),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NoRows,
            other => Self::Driver(other),
        }
    }
}

impl From<StoreError> for TaskboardError {
    fn from(err: StoreError) -> Self {
        TaskboardError::storage(err)
    }
}

/// Shared handle to the relational store.
///
/// Implementations must be safe to call from many tasks at once; the
/// repositories add no locking of their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SqlStore: Interface + Send + Sync {
    /// Runs a statement expected to yield one row.
    ///
    /// Returns [`StoreError::NoRows`] when it yields none; extra rows are
    /// ignored.
    async fn fetch_one(&self, sql: &str, params: &[SqlValue]) -> Result<Record, StoreError>;

    /// Runs a statement and returns every row, possibly none.
    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Record>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn user_record() -> Record {
        Record::new()
            .with("id", 1)
            .with("first_name", "test name")
            .with("nickname", None::<String>)
    }

    #[test]
    fn test_get_typed_columns() {
        let record = user_record();
        assert_eq!(record.get::<i32>("id").unwrap(), 1);
        assert_eq!(record.get::<i64>("id").unwrap(), 1);
        assert_eq!(record.get::<String>("first_name").unwrap(), "test name");
        assert_eq!(record.get::<Option<String>>("nickname").unwrap(), None);
    }

    #[test]
    fn test_missing_column_is_scan_error() {
        let err = user_record().get::<String>("last_name").unwrap_err();
        assert!(matches!(err, StoreError::Column { ref column, .. } if column == "last_name"));
    }

    #[test]
    fn test_type_mismatch_is_scan_error() {
        let err = user_record().get::<i32>("first_name").unwrap_err();
        assert!(err.to_string().contains("cannot scan TEXT"));
    }

    #[test]
    fn test_null_into_required_field_is_scan_error() {
        let err = user_record().get::<String>("nickname").unwrap_err();
        assert!(matches!(err, StoreError::Column { .. }));
    }

    #[test]
    fn test_bigint_out_of_range_for_i32() {
        let record = Record::new().with("id", i64::MAX);
        assert!(record.get::<i32>("id").is_err());
    }

    #[test]
    fn test_columns_keep_order() {
        let record = user_record();
        let names: Vec<&str> = record.columns().collect();
        assert_eq!(names, ["id", "first_name", "nickname"]);
        assert_eq!(user_record().len(), 3);
        assert!(Record::new().is_empty());
    }

    #[test]
    fn test_driver_row_not_found_is_no_rows() {
        assert!(StoreError::from(sqlx::Error::RowNotFound).is_no_rows());
        assert!(!StoreError::from(sqlx::Error::PoolTimedOut).is_no_rows());
    }

    #[test]
    fn test_lookup_error_classification() {
        let not_found = StoreError::NoRows.into_lookup_error("user", 404);
        assert!(not_found.is_not_found());
        assert!(not_found.to_string().contains("404"));

        let storage = StoreError::Driver(sqlx::Error::PoolTimedOut).into_lookup_error("user", 1);
        assert!(storage.is_storage());
        assert!(storage.source().is_some());
    }

    #[test]
    fn test_insert_without_identifier_is_storage_error() {
        let err = StoreError::NoRows.into_insert_error("users");
        assert!(err.is_storage());
        assert!(err.to_string().contains("returned no identifier"));
    }

    #[test]
    fn test_scan_error_converts_to_storage() {
        let err: TaskboardError = StoreError::column("id", "bad").into();
        assert!(err.is_storage());
    }
}

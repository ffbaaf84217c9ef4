//! Untyped storage rows and typed column decoding.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::raw::{RawValue, TextCell};
use crate::error::CodecError;

/// Decode one column value into a typed field.
pub trait FromRaw: Sized {
    fn from_raw(raw: RawValue) -> Result<Self, CodecError>;
}

impl FromRaw for String {
    fn from_raw(raw: RawValue) -> Result<Self, CodecError> {
        match raw.into_text_cell("string")? {
            TextCell::Text(s) => Ok(s),
            TextCell::Absent => Err(CodecError::UnsupportedScanType {
                target: "string",
                found: "null",
            }),
        }
    }
}

impl FromRaw for i32 {
    fn from_raw(raw: RawValue) -> Result<Self, CodecError> {
        match raw {
            RawValue::Int(n) => i32::try_from(n).map_err(|_| CodecError::OutOfRange {
                target: "int32",
                value: n,
            }),
            other => Err(CodecError::UnsupportedScanType {
                target: "int32",
                found: other.type_name(),
            }),
        }
    }
}

impl FromRaw for bool {
    fn from_raw(raw: RawValue) -> Result<Self, CodecError> {
        match raw {
            RawValue::Bool(b) => Ok(b),
            // TINYINT(1)-style booleans
            RawValue::Int(0) => Ok(false),
            RawValue::Int(1) => Ok(true),
            RawValue::Int(n) => Err(CodecError::OutOfRange { target: "bool", value: n }),
            other => Err(CodecError::UnsupportedScanType {
                target: "bool",
                found: other.type_name(),
            }),
        }
    }
}

impl FromRaw for DateTime<Utc> {
    fn from_raw(raw: RawValue) -> Result<Self, CodecError> {
        match raw {
            RawValue::Timestamp(t) => Ok(t),
            RawValue::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| CodecError::Malformed {
                    target: "timestamp",
                    value: s,
                }),
            other => Err(CodecError::UnsupportedScanType {
                target: "timestamp",
                found: other.type_name(),
            }),
        }
    }
}

impl<T: FromRaw> FromRaw for Option<T> {
    fn from_raw(raw: RawValue) -> Result<Self, CodecError> {
        if raw.is_null() {
            return Ok(None);
        }
        T::from_raw(raw).map(Some)
    }
}

/// A storage row: column name to dynamic value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageRow {
    columns: BTreeMap<String, RawValue>,
}

impl StorageRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insert.
    pub fn with(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<RawValue>) {
        self.columns.insert(column.to_string(), value.into());
    }

    pub fn remove(&mut self, column: &str) -> Option<RawValue> {
        self.columns.remove(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Decode one column. Errors are tagged with the column name.
    pub fn get<T: FromRaw>(&self, column: &str) -> Result<T, CodecError> {
        let raw = self
            .columns
            .get(column)
            .cloned()
            .ok_or_else(|| CodecError::MissingColumn {
                column: column.to_string(),
            })?;
        T::from_raw(raw).map_err(|e| e.in_column(column))
    }
}

impl FromIterator<(String, RawValue)> for StorageRow {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Build an entity from a whole storage row.
///
/// Implementations decode every column with `?`, so one failing column fails
/// the whole row and no partial entity is ever produced.
pub trait FromStorageRow: Sized {
    fn from_storage_row(row: &StorageRow) -> Result<Self, CodecError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_columns() {
        let row = StorageRow::new()
            .with("limit", 10)
            .with("big", i64::from(i32::MAX) + 1)
            .with("text", "10");

        assert_eq!(row.get::<i32>("limit").unwrap(), 10);
        assert!(matches!(
            row.get::<i32>("big").unwrap_err().root(),
            CodecError::OutOfRange { target: "int32", .. }
        ));
        assert!(matches!(
            row.get::<i32>("text").unwrap_err().root(),
            CodecError::UnsupportedScanType { found: "string", .. }
        ));
    }

    #[test]
    fn test_nullable_columns() {
        let row = StorageRow::new()
            .with("name", None::<String>)
            .with("remaining", Some(3));

        assert_eq!(row.get::<Option<String>>("name").unwrap(), None);
        assert_eq!(row.get::<Option<i32>>("remaining").unwrap(), Some(3));
        assert!(row.get::<String>("name").is_err());
    }

    #[test]
    fn test_missing_column() {
        let row = StorageRow::new();
        let err = row.get::<Option<String>>("owner_id").unwrap_err();
        assert_eq!(err.to_string(), "missing column owner_id");
    }

    #[test]
    fn test_timestamp_from_text_and_native() {
        let now = Utc::now();
        let row = StorageRow::new()
            .with("a", now)
            .with("b", "2024-01-02T03:04:05Z")
            .with("c", "yesterday");

        assert_eq!(row.get::<DateTime<Utc>>("a").unwrap(), now);
        assert_eq!(
            row.get::<DateTime<Utc>>("b").unwrap().to_rfc3339(),
            "2024-01-02T03:04:05+00:00"
        );
        assert!(matches!(
            row.get::<DateTime<Utc>>("c").unwrap_err().root(),
            CodecError::Malformed { .. }
        ));
    }

    #[test]
    fn test_bool_accepts_tinyint() {
        let row = StorageRow::new().with("a", 1).with("b", false).with("c", 2);
        assert!(row.get::<bool>("a").unwrap());
        assert!(!row.get::<bool>("b").unwrap());
        assert!(row.get::<bool>("c").is_err());
    }
}

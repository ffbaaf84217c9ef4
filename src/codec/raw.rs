//! Dynamic storage values and the narrowed text boundary.
//!
//! A storage collaborator hands over one `RawValue` per row-column. Only
//! absence, bytes and strings are meaningful to text-backed columns; those are
//! normalized into a `TextCell` before any enumerated decode happens.

use chrono::{DateTime, Utc};

use crate::error::CodecError;

/// A column value of dynamic shape, as supplied by the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// SQL NULL
    Null,
    Bytes(Vec<u8>),
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl RawValue {
    /// Name of the dynamic shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bytes(_) => "bytes",
            RawValue::Text(_) => "string",
            RawValue::Int(_) => "int64",
            RawValue::Float(_) => "float64",
            RawValue::Bool(_) => "bool",
            RawValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Narrow this value to the text boundary.
    ///
    /// `target` names the column type being decoded and is carried into the
    /// error when the shape is not one of {null, bytes, string}. Bytes are read
    /// as UTF-8; invalid sequences are replaced with U+FFFD rather than
    /// rejected, so such a value does not re-encode to its original bytes.
    /// The replaced text never matches a declared literal and is reported by
    /// `validation` as undeclared.
    pub fn into_text_cell(self, target: &'static str) -> Result<TextCell, CodecError> {
        match self {
            RawValue::Null => Ok(TextCell::Absent),
            RawValue::Text(s) => Ok(TextCell::Text(s)),
            RawValue::Bytes(b) => Ok(TextCell::Text(match String::from_utf8(b) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            })),
            other => Err(CodecError::UnsupportedScanType {
                target,
                found: other.type_name(),
            }),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&[u8]> for RawValue {
    fn from(b: &[u8]) -> Self {
        RawValue::Bytes(b.to_vec())
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Int(n)
    }
}

impl From<i32> for RawValue {
    fn from(n: i32) -> Self {
        RawValue::Int(n.into())
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(t: DateTime<Utc>) -> Self {
        RawValue::Timestamp(t)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}

/// A text column value: either absent or a string.
///
/// This is both what text-backed columns decode from and what optional
/// enumerated fields encode to for parameter binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCell {
    Absent,
    Text(String),
}

impl TextCell {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            TextCell::Absent => None,
            TextCell::Text(s) => Some(s),
        }
    }
}

impl From<TextCell> for Option<String> {
    fn from(cell: TextCell) -> Self {
        match cell {
            TextCell::Absent => None,
            TextCell::Text(s) => Some(s),
        }
    }
}

impl From<TextCell> for RawValue {
    fn from(cell: TextCell) -> Self {
        match cell {
            TextCell::Absent => RawValue::Null,
            TextCell::Text(s) => RawValue::Text(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_and_strings_narrow_to_text() {
        let cell = RawValue::from(&b"jwt"[..]).into_text_cell("AuthType").unwrap();
        assert_eq!(cell, TextCell::Text("jwt".to_string()));

        let cell = RawValue::from("key").into_text_cell("AuthType").unwrap();
        assert_eq!(cell.as_deref(), Some("key"));
    }

    #[test]
    fn test_null_narrows_to_absent() {
        let cell = RawValue::Null.into_text_cell("Plan").unwrap();
        assert_eq!(cell, TextCell::Absent);
        assert_eq!(Option::<String>::from(cell), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let cell = RawValue::Bytes(vec![b'p', 0xff, b'o'])
            .into_text_cell("Plan")
            .unwrap();
        assert_eq!(cell.as_deref(), Some("p\u{fffd}o"));
        assert_ne!(cell.as_deref().map(str::as_bytes), Some(&[b'p', 0xff, b'o'][..]));
    }

    #[test]
    fn test_other_shapes_are_rejected() {
        for raw in [
            RawValue::Int(42),
            RawValue::Float(1.5),
            RawValue::Bool(true),
            RawValue::Timestamp(Utc::now()),
        ] {
            let found = raw.type_name();
            let err = raw.into_text_cell("Plan").unwrap_err();
            assert!(matches!(
                err,
                CodecError::UnsupportedScanType { target: "Plan", found: f } if f == found
            ));
        }
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(RawValue::from(None::<i32>), RawValue::Null);
        assert_eq!(RawValue::from(Some(7)), RawValue::Int(7));
    }
}

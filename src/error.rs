//! Error types for decoding storage values and for the audit application.
//!
//! The codec layer never logs; every failure is returned to the caller, which
//! decides whether to skip the row or abort the query.

/// Failure while decoding a storage value into a typed column.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The storage layer supplied a dynamic shape the target type cannot read.
    ///
    /// `found` names the received shape (e.g. "int64"), `target` the column type.
    #[error("unsupported scan type for {target}: {found}")]
    UnsupportedScanType {
        target: &'static str,
        found: &'static str,
    },

    /// Integer does not fit the column's width.
    #[error("value {value} out of range for {target}")]
    OutOfRange { target: &'static str, value: i64 },

    /// Text could not be parsed as the target type (e.g. a timestamp).
    #[error("malformed {target} value: {value:?}")]
    Malformed { target: &'static str, value: String },

    /// The row carried no value for a column the entity requires.
    #[error("missing column {column}")]
    MissingColumn { column: String },

    /// A column-level failure, tagged with the column it came from.
    #[error("column {column}: {source}")]
    Column {
        column: String,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Wrap this error with the column it occurred in.
    pub fn in_column(self, column: &str) -> Self {
        CodecError::Column {
            column: column.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with column wrappers removed.
    pub fn root(&self) -> &CodecError {
        match self {
            CodecError::Column { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Application-wide error type for the audit binary and request validation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    #[error("Decode error: {0}")]
    Codec(#[from] CodecError),

    /// Request data is invalid. The String says what was wrong.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_scan_type_names_received_type() {
        let err = CodecError::UnsupportedScanType {
            target: "Plan",
            found: "int64",
        };
        assert_eq!(err.to_string(), "unsupported scan type for Plan: int64");
    }

    #[test]
    fn test_column_wrapper_keeps_root() {
        let err = CodecError::UnsupportedScanType {
            target: "AuthType",
            found: "float64",
        }
        .in_column("auth_type");

        assert_eq!(
            err.to_string(),
            "column auth_type: unsupported scan type for AuthType: float64"
        );
        assert!(matches!(
            err.root(),
            CodecError::UnsupportedScanType { found: "float64", .. }
        ));
    }
}

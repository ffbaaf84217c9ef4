//! Key-auth group model.

use serde::{Deserialize, Serialize};

use crate::codec::{FromStorageRow, StorageRow};
use crate::error::CodecError;

/// A group of keys scoped to exactly one workspace.
///
/// Maps to the `key_auth` table. APIs point at a group to validate keys
/// against it; keys point at the group they belong to.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct KeyAuth {
    pub id: String,
    pub workspace_id: String,
}

impl FromStorageRow for KeyAuth {
    fn from_storage_row(row: &StorageRow) -> Result<Self, CodecError> {
        Ok(Self {
            id: row.get("id")?,
            workspace_id: row.get("workspace_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RawValue;

    #[test]
    fn test_decode_key_auth_row() {
        let row = StorageRow::new()
            .with("id", "ka_1")
            .with("workspace_id", &b"ws_1"[..]);

        let ka = KeyAuth::from_storage_row(&row).unwrap();
        assert_eq!(ka.id, "ka_1");
        assert_eq!(ka.workspace_id, "ws_1");
    }

    #[test]
    fn test_null_workspace_fails_row() {
        let row = StorageRow::new()
            .with("id", "ka_1")
            .with("workspace_id", RawValue::Null);

        let err = KeyAuth::from_storage_row(&row).unwrap_err();
        assert!(matches!(err, CodecError::Column { ref column, .. } if column == "workspace_id"));
    }
}

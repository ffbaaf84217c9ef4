//! API definition model.

use serde::{Deserialize, Serialize};

use crate::codec::{FromStorageRow, StorageRow};
use crate::error::CodecError;
use crate::models::enums::AuthType;

/// Represents an API record from the database.
///
/// # Database Table
///
/// Maps to the `apis` table. Each API:
/// - Belongs to one workspace (via `workspace_id`)
/// - Validates keys against at most one key-auth group (via `key_auth_id`)
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Api {
    pub id: String,
    pub name: String,
    pub workspace_id: String,

    /// Comma-separated list of allowed client IPs; NULL allows any
    pub ip_whitelist: Option<String>,

    pub auth_type: Option<AuthType>,
    pub key_auth_id: Option<String>,
}

impl FromStorageRow for Api {
    fn from_storage_row(row: &StorageRow) -> Result<Self, CodecError> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            workspace_id: row.get("workspace_id")?,
            ip_whitelist: row.get("ip_whitelist")?,
            auth_type: row.get("auth_type")?,
            key_auth_id: row.get("key_auth_id")?,
        })
    }
}

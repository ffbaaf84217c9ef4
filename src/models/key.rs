//! Key model and its rate-limit descriptor.
//!
//! Keys are stored as SHA-256 hashes (see `secret`); only the short `start`
//! prefix of the plaintext is kept for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{FromStorageRow, StorageRow};
use crate::error::CodecError;

/// Rate-limit settings of a key.
///
/// Every field is independently nullable. Writers are expected to set
/// `ratelimit_type` whenever any of the numeric fields is set; decoding does
/// not enforce that (see `validation::check_key`).
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct RateLimit {
    /// Limiter flavour, e.g. "fast" or "consistent"
    pub ratelimit_type: Option<String>,

    /// Bucket size
    pub ratelimit_limit: Option<i32>,

    /// Tokens added per refill
    pub ratelimit_refill_rate: Option<i32>,

    /// Milliseconds between refills
    pub ratelimit_refill_interval: Option<i32>,
}

impl RateLimit {
    /// Whether any numeric limit field is set.
    pub fn has_numeric_fields(&self) -> bool {
        self.ratelimit_limit.is_some()
            || self.ratelimit_refill_rate.is_some()
            || self.ratelimit_refill_interval.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.ratelimit_type.is_none() && !self.has_numeric_fields()
    }
}

impl FromStorageRow for RateLimit {
    fn from_storage_row(row: &StorageRow) -> Result<Self, CodecError> {
        Ok(Self {
            ratelimit_type: row.get("ratelimit_type")?,
            ratelimit_limit: row.get("ratelimit_limit")?,
            ratelimit_refill_rate: row.get("ratelimit_refill_rate")?,
            ratelimit_refill_interval: row.get("ratelimit_refill_interval")?,
        })
    }
}

/// Represents a key record from the database.
///
/// # Database Table
///
/// Maps to the `keys` table. Each key:
/// - Belongs to one workspace (`workspace_id`) and one key-auth group (`key_auth_id`)
/// - May act on behalf of another workspace (`for_workspace_id`)
/// - Carries optional expiry, rate limit and remaining-uses settings
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Key {
    pub id: String,

    /// SHA-256 hash of the plaintext key (64 hex characters)
    pub hash: String,

    /// First characters of the plaintext, safe to display
    pub start: String,

    /// Caller-defined owner reference (user id, email, ...)
    pub owner_id: Option<String>,

    /// Free-form metadata, usually JSON
    pub meta: Option<String>,

    pub created_at: DateTime<Utc>,

    /// The key is rejected after this instant
    pub expires: Option<DateTime<Utc>>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub ratelimit: RateLimit,

    pub workspace_id: String,

    /// Workspace the key acts for, when it was issued on its behalf
    pub for_workspace_id: Option<String>,

    pub name: Option<String>,

    /// Uses left before the key is exhausted; NULL means unlimited
    pub remaining_requests: Option<i32>,

    pub key_auth_id: String,
}

impl FromStorageRow for Key {
    fn from_storage_row(row: &StorageRow) -> Result<Self, CodecError> {
        Ok(Self {
            id: row.get("id")?,
            hash: row.get("hash")?,
            start: row.get("start")?,
            owner_id: row.get("owner_id")?,
            meta: row.get("meta")?,
            created_at: row.get("created_at")?,
            expires: row.get("expires")?,
            ratelimit: RateLimit::from_storage_row(row)?,
            workspace_id: row.get("workspace_id")?,
            for_workspace_id: row.get("for_workspace_id")?,
            name: row.get("name")?,
            remaining_requests: row.get("remaining_requests")?,
            key_auth_id: row.get("key_auth_id")?,
        })
    }
}

//! Database connection pool and entity loading.
//!
//! Rows are read with plain `SELECT`s and decoded through each entity's
//! `sqlx::FromRow` impl. A row that fails to decode fails the whole load.
//! Rows handed over in untyped form go through `decode_rows` instead.

use sqlx::{Pool, Postgres};

use crate::codec::{FromStorageRow, StorageRow};
use crate::error::AppError;
use crate::models::{Api, Key, KeyAuth, Workspace};

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the server cannot
/// be reached.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, AppError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn load_workspaces(pool: &DbPool) -> Result<Vec<Workspace>, AppError> {
    let rows = sqlx::query_as::<_, Workspace>(
        r#"
        SELECT id, name, slug, tenant_id, internal,
               stripe_customer_id, stripe_subscription_id, plan,
               quota_max_active_keys, usage_active_keys,
               quota_max_verifications, usage_verifications,
               last_usage_update
        FROM workspaces
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn load_key_auths(pool: &DbPool) -> Result<Vec<KeyAuth>, AppError> {
    let rows = sqlx::query_as::<_, KeyAuth>("SELECT id, workspace_id FROM key_auth ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn load_apis(pool: &DbPool) -> Result<Vec<Api>, AppError> {
    let rows = sqlx::query_as::<_, Api>(
        "SELECT id, name, workspace_id, ip_whitelist, auth_type, key_auth_id FROM apis ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn load_keys(pool: &DbPool) -> Result<Vec<Key>, AppError> {
    let rows = sqlx::query_as::<_, Key>(
        r#"
        SELECT id, hash, start, owner_id, meta, created_at, expires,
               ratelimit_type, ratelimit_limit, ratelimit_refill_rate,
               ratelimit_refill_interval, workspace_id, for_workspace_id,
               name, remaining_requests, key_auth_id
        FROM keys
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Decode untyped storage rows into entities.
///
/// Stops at the first row that fails; no partial result is returned.
pub fn decode_rows<T: FromStorageRow>(rows: &[StorageRow]) -> Result<Vec<T>, AppError> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(T::from_storage_row(row)?);
    }
    Ok(out)
}

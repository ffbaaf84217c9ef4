//! Workspace (tenant) model and the workspace creation request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{FromStorageRow, StorageRow};
use crate::error::CodecError;
use crate::models::enums::Plan;

/// Represents a workspace record from the database.
///
/// # Database Table
///
/// Maps to the `workspaces` table. A workspace is the tenant boundary: it
/// owns APIs, key-auth groups and keys, all by `workspace_id` reference.
///
/// # Quotas
///
/// Usage counters sit next to the quota they are measured against. Nothing
/// here checks that usage stays within quota; see `validation`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,

    /// Display name
    pub name: String,

    /// URL slug, unique per tenant
    pub slug: String,

    /// External tenant (organization or user) this workspace belongs to
    pub tenant_id: String,

    /// Internal workspaces belong to the platform operator
    pub internal: bool,

    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,

    /// NULL when no plan has been assigned
    pub plan: Option<Plan>,

    pub quota_max_active_keys: Option<i32>,
    pub usage_active_keys: Option<i32>,
    pub quota_max_verifications: Option<i32>,
    pub usage_verifications: Option<i32>,

    /// When the usage counters were last refreshed
    pub last_usage_update: Option<DateTime<Utc>>,
}

impl FromStorageRow for Workspace {
    fn from_storage_row(row: &StorageRow) -> Result<Self, CodecError> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            slug: row.get("slug")?,
            tenant_id: row.get("tenant_id")?,
            internal: row.get("internal")?,
            stripe_customer_id: row.get("stripe_customer_id")?,
            stripe_subscription_id: row.get("stripe_subscription_id")?,
            plan: row.get("plan")?,
            quota_max_active_keys: row.get("quota_max_active_keys")?,
            usage_active_keys: row.get("usage_active_keys")?,
            quota_max_verifications: row.get("quota_max_verifications")?,
            usage_verifications: row.get("usage_verifications")?,
            last_usage_update: row.get("last_usage_update")?,
        })
    }
}

/// Request body for creating a new workspace.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Acme Production",
///   "slug": "acme-prod",
///   "plan": "pro"
/// }
/// ```
///
/// # Validation
///
/// See `validation::validate_create_workspace`.
/// - `name`: 3 to 50 characters
/// - `slug`: 1 to 50 characters of `[A-Za-z0-9-_.]`
/// - `plan`: optional, `free` or `pro`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub plan: Option<Plan>,
}

impl CreateWorkspaceRequest {
    /// Plan to assign when the request names none.
    ///
    /// A tenant's first workspace starts on the free plan, later ones on pro.
    pub fn default_plan(existing_workspaces: usize) -> Plan {
        if existing_workspaces == 0 {
            Plan::Free
        } else {
            Plan::Pro
        }
    }

    pub fn effective_plan(&self, existing_workspaces: usize) -> Plan {
        self.plan
            .clone()
            .unwrap_or_else(|| Self::default_plan(existing_workspaces))
    }
}

//! Advisory data-quality checks and request validation.
//!
//! Decoding accepts anything the storage layer can represent. The checks here
//! run afterwards and report what a writer got wrong: undeclared enum
//! literals, half-filled rate-limit groups, usage counters out of bounds.
//! Findings are returned and also logged as warnings.

use std::collections::HashSet;
use std::fmt;

use crate::codec::LiteralEnum;
use crate::error::AppError;
use crate::models::{Api, CreateWorkspaceRequest, Key, KeyAuth, Plan, Workspace};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 50;
const SLUG_MAX: usize = 50;

/// One data-quality problem found on a decoded entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// An enumerated column holds text outside its declared literal set.
    UndeclaredLiteral {
        entity: &'static str,
        id: String,
        column: &'static str,
        literal: String,
    },

    /// A numeric rate-limit field is set without a rate-limit type.
    PartialRateLimit { key_id: String },

    /// A counter that can only count up is negative.
    NegativeCounter {
        entity: &'static str,
        id: String,
        column: &'static str,
        value: i32,
    },

    /// A usage counter exceeds its quota.
    UsageOverQuota {
        workspace_id: String,
        column: &'static str,
        usage: i32,
        quota: i32,
    },

    /// A foreign reference points at a row that was not loaded.
    DanglingReference {
        entity: &'static str,
        id: String,
        column: &'static str,
        target: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::UndeclaredLiteral {
                entity,
                id,
                column,
                literal,
            } => write!(f, "{entity} {id}: {column} has undeclared value {literal:?}"),
            Finding::PartialRateLimit { key_id } => {
                write!(f, "key {key_id}: rate limit values set without ratelimit_type")
            }
            Finding::NegativeCounter {
                entity,
                id,
                column,
                value,
            } => write!(f, "{entity} {id}: {column} is negative ({value})"),
            Finding::UsageOverQuota {
                workspace_id,
                column,
                usage,
                quota,
            } => write!(
                f,
                "workspace {workspace_id}: {column} {usage} exceeds quota {quota}"
            ),
            Finding::DanglingReference {
                entity,
                id,
                column,
                target,
            } => write!(f, "{entity} {id}: {column} references unknown {target:?}"),
        }
    }
}

fn undeclared<E: LiteralEnum>(
    entity: &'static str,
    id: &str,
    column: &'static str,
    value: Option<&E>,
) -> Option<Finding> {
    value
        .filter(|v| !v.is_declared())
        .map(|v| Finding::UndeclaredLiteral {
            entity,
            id: id.to_string(),
            column,
            literal: v.as_literal().to_string(),
        })
}

fn negative(entity: &'static str, id: &str, column: &'static str, value: Option<i32>) -> Option<Finding> {
    value.filter(|v| *v < 0).map(|value| Finding::NegativeCounter {
        entity,
        id: id.to_string(),
        column,
        value,
    })
}

fn over_quota(ws: &Workspace, column: &'static str, usage: Option<i32>, quota: Option<i32>) -> Option<Finding> {
    match (usage, quota) {
        (Some(usage), Some(quota)) if usage > quota => Some(Finding::UsageOverQuota {
            workspace_id: ws.id.clone(),
            column,
            usage,
            quota,
        }),
        _ => None,
    }
}

fn dangling(
    entity: &'static str,
    id: &str,
    column: &'static str,
    target: Option<&str>,
    known: &HashSet<&str>,
) -> Option<Finding> {
    target
        .filter(|t| !known.contains(t))
        .map(|target| Finding::DanglingReference {
            entity,
            id: id.to_string(),
            column,
            target: target.to_string(),
        })
}

fn report(findings: Vec<Finding>) -> Vec<Finding> {
    for finding in &findings {
        tracing::warn!(%finding, "data quality finding");
    }
    findings
}

/// Check a workspace's plan literal and usage counters.
pub fn check_workspace(ws: &Workspace) -> Vec<Finding> {
    let findings = [
        undeclared("workspace", &ws.id, "plan", ws.plan.as_ref()),
        negative("workspace", &ws.id, "usage_active_keys", ws.usage_active_keys),
        negative("workspace", &ws.id, "usage_verifications", ws.usage_verifications),
        over_quota(ws, "usage_active_keys", ws.usage_active_keys, ws.quota_max_active_keys),
        over_quota(
            ws,
            "usage_verifications",
            ws.usage_verifications,
            ws.quota_max_verifications,
        ),
    ];
    report(findings.into_iter().flatten().collect())
}

/// Check an API's auth type literal.
pub fn check_api(api: &Api) -> Vec<Finding> {
    report(
        undeclared("api", &api.id, "auth_type", api.auth_type.as_ref())
            .into_iter()
            .collect(),
    )
}

/// Check a key's rate-limit grouping and remaining-uses counter.
pub fn check_key(key: &Key) -> Vec<Finding> {
    let mut findings = Vec::new();
    if key.ratelimit.ratelimit_type.is_none() && key.ratelimit.has_numeric_fields() {
        findings.push(Finding::PartialRateLimit {
            key_id: key.id.clone(),
        });
    }
    findings.extend(negative("key", &key.id, "remaining_requests", key.remaining_requests));
    report(findings)
}

/// Check that every foreign reference resolves within the loaded entities.
///
/// Covers `key_auth.workspace_id`, `apis.workspace_id`, `apis.key_auth_id`,
/// `keys.workspace_id`, `keys.for_workspace_id` and `keys.key_auth_id`.
pub fn check_references(
    workspaces: &[Workspace],
    key_auths: &[KeyAuth],
    apis: &[Api],
    keys: &[Key],
) -> Vec<Finding> {
    let ws_ids: HashSet<&str> = workspaces.iter().map(|w| w.id.as_str()).collect();
    let ka_ids: HashSet<&str> = key_auths.iter().map(|k| k.id.as_str()).collect();

    let mut findings = Vec::new();
    for ka in key_auths {
        findings.extend(dangling("key_auth", &ka.id, "workspace_id", Some(ka.workspace_id.as_str()), &ws_ids));
    }
    for api in apis {
        findings.extend(dangling("api", &api.id, "workspace_id", Some(api.workspace_id.as_str()), &ws_ids));
        findings.extend(dangling("api", &api.id, "key_auth_id", api.key_auth_id.as_deref(), &ka_ids));
    }
    for key in keys {
        findings.extend(dangling("key", &key.id, "workspace_id", Some(key.workspace_id.as_str()), &ws_ids));
        findings.extend(dangling("key", &key.id, "for_workspace_id", key.for_workspace_id.as_deref(), &ws_ids));
        findings.extend(dangling("key", &key.id, "key_auth_id", Some(key.key_auth_id.as_str()), &ka_ids));
    }

    report(findings)
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Validate a workspace creation request.
///
/// # Rules
///
/// - `name`: 3 to 50 characters
/// - `slug`: 1 to 50 characters, each one of `[A-Za-z0-9-_.]`
/// - `plan`: when given, `free` or `pro` (enterprise is assigned by sales)
pub fn validate_create_workspace(req: &CreateWorkspaceRequest) -> Result<(), AppError> {
    // Counted as given; surrounding whitespace is not stripped
    let name_len = req.name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&name_len) {
        return Err(AppError::InvalidRequest(format!(
            "Name must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }

    if req.slug.is_empty() || req.slug.len() > SLUG_MAX {
        return Err(AppError::InvalidRequest(format!(
            "Slug must be between 1 and {SLUG_MAX} characters"
        )));
    }

    if !req.slug.chars().all(is_slug_char) {
        return Err(AppError::InvalidRequest(
            "Slug may only contain letters, digits, '-', '_' and '.'".to_string(),
        ));
    }

    match &req.plan {
        None | Some(Plan::Free) | Some(Plan::Pro) => Ok(()),
        Some(other) => Err(AppError::InvalidRequest(format!(
            "Plan {other} cannot be selected at creation"
        ))),
    }
}

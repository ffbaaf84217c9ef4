//! Key Store Audit - Main Application Entry Point
//!
//! Loads every workspace, key-auth group, API and key from PostgreSQL and
//! reports data-quality findings: undeclared enum literals, half-filled
//! rate-limit groups, usage counters outside their quotas, and references
//! to rows that do not exist.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Load and decode all entities
//! 4. Run the checks and log each finding
//! 5. Fail if `FAIL_ON_FINDINGS` is set and anything was found

use keyring_store::{config::Config, db, validation};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.max_connections).await?;
    tracing::info!("Database pool created");

    let workspaces = db::load_workspaces(&pool).await?;
    let key_auths = db::load_key_auths(&pool).await?;
    let apis = db::load_apis(&pool).await?;
    let keys = db::load_keys(&pool).await?;
    tracing::info!(
        workspaces = workspaces.len(),
        key_auths = key_auths.len(),
        apis = apis.len(),
        keys = keys.len(),
        "Entities loaded"
    );

    let mut findings = Vec::new();
    for ws in &workspaces {
        findings.extend(validation::check_workspace(ws));
    }
    for api in &apis {
        findings.extend(validation::check_api(api));
    }
    for key in &keys {
        findings.extend(validation::check_key(key));
    }

    findings.extend(validation::check_references(
        &workspaces,
        &key_auths,
        &apis,
        &keys,
    ));

    tracing::info!(findings = findings.len(), "Audit complete");

    if config.fail_on_findings && !findings.is_empty() {
        anyhow::bail!("audit reported {} finding(s)", findings.len());
    }

    Ok(())
}

//! Application configuration management.
//!
//! Configuration is read from environment variables with the `envy` crate,
//! after an optional `.env` file has been loaded.

use serde::Deserialize;

use crate::error::AppError;

/// Audit configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `FAIL_ON_FINDINGS` (optional): exit with an error when any data-quality
///   finding is reported, defaults to false
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default)]
    pub fail_on_findings: bool,
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from `.env` (if present) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its field type.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env::<Config>()?)
    }

    /// Load configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[("DATABASE_URL", "postgres://localhost/keys")])).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/keys");
        assert_eq!(config.max_connections, 5);
        assert!(!config.fail_on_findings);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db/keys"),
            ("MAX_CONNECTIONS", "12"),
            ("FAIL_ON_FINDINGS", "true"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 12);
        assert!(config.fail_on_findings);
    }

    #[test]
    fn test_database_url_required() {
        let err = Config::from_vars(vars(&[("MAX_CONNECTIONS", "3")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}

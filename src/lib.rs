//! Persisted data model for a multi-tenant API key platform.
//!
//! # Layout
//!
//! - `codec`: typed decoding of untyped storage values, including the
//!   nullable closed-set string enums, plus their Postgres binding
//! - `models`: Workspace, KeyAuth, Api and Key records
//! - `validation`: advisory data-quality checks and request validation
//! - `secret`: key generation and hashing
//! - `db` / `config`: loading entities for the audit binary

pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod secret;
pub mod validation;

//! Data models representing database entities.
//!
//! Entities reference each other by identifier only; none embeds another.

/// Enumerated column types
pub mod enums;
/// API definition model
pub mod api;
/// Key model and rate-limit descriptor
pub mod key;
/// Key-auth group model
pub mod key_auth;
/// Workspace (tenant) model
pub mod workspace;

pub use api::Api;
pub use enums::{AuthType, Plan};
pub use key::{Key, RateLimit};
pub use key_auth::KeyAuth;
pub use workspace::{CreateWorkspaceRequest, Workspace};

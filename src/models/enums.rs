//! Enumerated column types.

use crate::codec::literal::literal_enum;

literal_enum! {
    /// How an API authenticates callers (`apis.auth_type`).
    pub enum AuthType {
        Key => "key",
        Jwt => "jwt",
    }
}

literal_enum! {
    /// Billing plan of a workspace (`workspaces.plan`).
    pub enum Plan {
        Free => "free",
        Pro => "pro",
        Enterprise => "enterprise",
    }
}

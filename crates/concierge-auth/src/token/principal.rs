//! Authenticated identity attached to a request.

use chrono::{DateTime, Utc};

use concierge_entity::user::{Role, User};

/// The user a verified credential resolved to, plus the credential's expiry.
///
/// Built fresh for every request and never persisted.
#[derive(Debug, Clone)]
pub struct Principal {
    /// The user row loaded during validation.
    pub user: User,
    /// Expiry of the credential that produced this principal.
    pub expires_at: DateTime<Utc>,
}

impl Principal {
    /// The authenticated user's id.
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    /// The authenticated user's role.
    pub fn role(&self) -> Role {
        self.user.role
    }
}

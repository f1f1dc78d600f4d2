//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles a principal can hold. Route policies are expressed in these tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Back-office administrator.
    Admin,
    /// Regular customer account.
    User,
}

impl Role {
    /// Return the role tag as it appears on the wire and in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

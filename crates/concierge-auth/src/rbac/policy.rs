//! Per-route role requirement and its evaluation against a principal's role.

use std::fmt::Write;

use concierge_entity::user::Role;

/// Outcome of evaluating a [`RoutePolicy`] for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The request may continue to the handler.
    Allowed,
    /// The request must stop with a 403 carrying this message.
    Rejected(String),
}

impl Decision {
    /// Whether the request may continue.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Set of roles a route subtree requires, in declaration order.
///
/// Built once when the router is assembled and only read afterwards. An
/// empty policy imposes no role filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    roles: Vec<Role>,
}

impl RoutePolicy {
    /// Creates a policy from `roles`, dropping repeats but keeping first-seen order.
    pub fn new<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let mut deduped: Vec<Role> = Vec::new();
        for role in roles {
            if !deduped.contains(&role) {
                deduped.push(role);
            }
        }
        Self { roles: deduped }
    }

    /// Roles in declaration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Whether this policy lets every request through.
    pub fn is_open(&self) -> bool {
        self.roles.is_empty()
    }

    /// Whether `role` satisfies the policy. `None` means no principal.
    pub fn permits(&self, role: Option<Role>) -> bool {
        if self.is_open() {
            return true;
        }
        role.is_some_and(|r| self.roles.contains(&r))
    }

    /// Evaluates the policy for one request.
    pub fn evaluate(&self, role: Option<Role>) -> Decision {
        if self.permits(role) {
            Decision::Allowed
        } else {
            Decision::Rejected(self.rejection_message())
        }
    }

    /// `"Role ADMIN required"` or `"Roles ADMIN, USER required"`.
    pub fn rejection_message(&self) -> String {
        let mut message = String::from(if self.roles.len() == 1 { "Role " } else { "Roles " });
        for (i, role) in self.roles.iter().enumerate() {
            if i > 0 {
                message.push_str(", ");
            }
            let _ = write!(message, "{role}");
        }
        message.push_str(" required");
        message
    }
}

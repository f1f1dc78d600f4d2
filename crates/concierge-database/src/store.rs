//! Persistence contract for user accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use concierge_core::result::AppResult;
use concierge_entity::user::{CreateUser, Role, User};

/// Storage operations the token lifecycle and account handlers depend on.
///
/// Every method is a round trip to the backing store; implementations do
/// not cache. Errors are storage failures only: "no such user" is reported
/// through `Option`/`bool` returns.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user. The revocation horizon starts at the epoch, so the
    /// account holds no valid tokens until its first login.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Move the revocation horizon. Returns `true` if a row was changed.
    async fn update_expires_at(&self, id: i64, expires_at: DateTime<Utc>) -> AppResult<bool>;

    /// Set or clear the display name. Returns the updated row if it exists.
    async fn update_display_name(
        &self,
        id: i64,
        display_name: Option<&str>,
    ) -> AppResult<Option<User>>;

    /// Change a user's role. Returns the updated row if it exists.
    async fn update_role(&self, id: i64, role: Role) -> AppResult<Option<User>>;

    /// Delete a user. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

//! In-memory [`UserStore`] for single-node demos and tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use concierge_core::error::AppError;
use concierge_core::result::AppResult;
use concierge_entity::user::{CreateUser, Role, User};

use crate::store::UserStore;

/// Users kept in a concurrent map keyed by id.
///
/// A second map from lowercased username to id enforces case-insensitive
/// uniqueness. A name is claimed in that map before its row is written.
///
/// Suitable for single-node deployments only; nothing survives a restart.
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    users: Arc<DashMap<i64, User>>,
    usernames: Arc<DashMap<String, i64>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryUserStore {
    /// Creates an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            usernames: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Inserts a fully-formed user, keeping its id. Used to seed fixtures.
    pub fn insert(&self, user: User) {
        self.next_id.fetch_max(user.id + 1, Ordering::SeqCst);
        self.usernames.insert(username_key(&user.username), user.id);
        self.users.insert(user.id, user);
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn modify<F>(&self, id: i64, f: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut entry = self.users.get_mut(&id)?;
        f(entry.value_mut());
        entry.updated_at = Utc::now();
        Some(entry.clone())
    }
}

fn username_key(username: &str) -> String {
    username.to_lowercase()
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let Some(id) = self.usernames.get(&username_key(username)).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let slot = match self.usernames.entry(username_key(&data.username)) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Username '{}' is already taken",
                    data.username
                )));
            }
            Entry::Vacant(slot) => slot,
        };

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            display_name: data.display_name.clone(),
            role: data.role,
            expires_at: DateTime::UNIX_EPOCH,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        slot.insert(user.id);
        Ok(user)
    }

    async fn update_expires_at(&self, id: i64, expires_at: DateTime<Utc>) -> AppResult<bool> {
        Ok(self.modify(id, |u| u.expires_at = expires_at).is_some())
    }

    async fn update_display_name(
        &self,
        id: i64,
        display_name: Option<&str>,
    ) -> AppResult<Option<User>> {
        Ok(self.modify(id, |u| u.display_name = display_name.map(str::to_string)))
    }

    async fn update_role(&self, id: i64, role: Role) -> AppResult<Option<User>> {
        Ok(self.modify(id, |u| u.role = role))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let Some((_, user)) = self.users.remove(&id) else {
            return Ok(false);
        };
        self.usernames
            .remove_if(&username_key(&user.username), |_, owner| *owner == id);
        Ok(true)
    }
}

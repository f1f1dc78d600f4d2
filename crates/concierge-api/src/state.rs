//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use concierge_auth::password::PasswordHasher;
use concierge_auth::token::TokenManager;
use concierge_core::config::AuthConfig;
use concierge_core::result::AppResult;
use concierge_database::store::UserStore;

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Token and cookie settings
    pub auth: Arc<AuthConfig>,
    /// User persistence
    pub users: Arc<dyn UserStore>,
    /// Token lifecycle manager
    pub tokens: Arc<TokenManager>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
}

impl AppState {
    /// Wires the auth services around `users`.
    ///
    /// Fails on an auth configuration the token manager rejects.
    pub fn new(auth: AuthConfig, users: Arc<dyn UserStore>) -> AppResult<Self> {
        let tokens = TokenManager::new(&auth, Arc::clone(&users))?;
        Ok(Self {
            auth: Arc::new(auth),
            users,
            tokens: Arc::new(tokens),
            password_hasher: Arc::new(PasswordHasher::new()),
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Value of the `iss` claim, checked on every request.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Value of the `aud` claim, checked on every request.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Realm advertised in `WWW-Authenticate` challenges.
    #[serde(default = "default_realm")]
    pub realm: String,
    /// Token lifetime in minutes. Also the per-user revocation horizon.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: default_issuer(),
            audience: default_audience(),
            realm: default_realm(),
            token_ttl_minutes: default_token_ttl(),
            session_cookie: default_session_cookie(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "http://0.0.0.0:8080/".to_string()
}

fn default_audience() -> String {
    "http://0.0.0.0:8080/".to_string()
}

fn default_realm() -> String {
    "concierge".to_string()
}

fn default_token_ttl() -> u64 {
    60
}

fn default_session_cookie() -> String {
    "session".to_string()
}

//! Issue, validate, and invalidate bearer credentials.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use concierge_core::config::AuthConfig;
use concierge_core::error::AppError;
use concierge_core::result::AppResult;
use concierge_database::store::UserStore;

use super::principal::Principal;
use crate::jwt::{JwtDecoder, JwtEncoder, TokenClaims};

/// Upper bound for `auth.token_ttl_minutes`: one year.
pub const MAX_TOKEN_TTL_MINUTES: u64 = 60 * 24 * 365;

fn token_ttl(minutes: u64) -> AppResult<Duration> {
    if minutes == 0 || minutes > MAX_TOKEN_TTL_MINUTES {
        return Err(AppError::configuration(format!(
            "auth.token_ttl_minutes must be between 1 and {MAX_TOKEN_TTL_MINUTES}, got {minutes}"
        )));
    }
    i64::try_from(minutes)
        .ok()
        .and_then(Duration::try_minutes)
        .ok_or_else(|| AppError::configuration(format!("Invalid token TTL: {minutes} minutes")))
}

/// A freshly minted credential.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    /// Signed JWT.
    pub token: String,
    /// When the token (and the user's revocation horizon) expires.
    pub expires_at: DateTime<Utc>,
}

/// Why a well-signed credential was not honored.
///
/// Only ever logged; callers see a single "invalid" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// The `user_id` claim is absent.
    MissingUserId,
    /// The token's own `exp` has passed.
    Expired,
    /// No user row exists for the claimed id.
    UnknownUser,
    /// The user's revocation horizon has passed (logout or expiry).
    Revoked,
}

impl TokenRejection {
    fn as_str(&self) -> &'static str {
        match self {
            Self::MissingUserId => "missing_user_id",
            Self::Expired => "expired",
            Self::UnknownUser => "unknown_user",
            Self::Revoked => "revoked",
        }
    }
}

/// Outcome of authenticating a raw credential string, one variant per
/// distinct 401 message the HTTP layer emits.
#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    /// No credential was presented.
    #[error("Missing or empty Authorization header")]
    MissingCredential,
    /// The credential failed signature, issuer, audience, or format checks.
    #[error("Invalid token")]
    InvalidToken,
    /// The credential decoded but is expired, revoked, or names no user.
    #[error("Token is not valid or has expired")]
    Rejected,
    /// The backing store failed; not an authentication outcome.
    #[error(transparent)]
    Storage(#[from] AppError),
}

/// Mints and verifies credentials, with server-side revocation through the
/// per-user `expires_at` horizon.
///
/// Every operation is a store round trip; nothing is cached between requests.
#[derive(Clone)]
pub struct TokenManager {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("encoder", &self.encoder)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenManager {
    /// Creates a manager signing with `config` and persisting through `users`.
    ///
    /// Fails if `token_ttl_minutes` is zero or above [`MAX_TOKEN_TTL_MINUTES`].
    pub fn new(config: &AuthConfig, users: Arc<dyn UserStore>) -> AppResult<Self> {
        Ok(Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            users,
            ttl: token_ttl(config.token_ttl_minutes)?,
        })
    }

    /// Returns the decoder used for the signature/issuer/audience step.
    pub fn decoder(&self) -> &JwtDecoder {
        &self.decoder
    }

    /// Mints a token for `user_id` and moves the user's revocation horizon to
    /// the token's expiry.
    ///
    /// The caller is responsible for `user_id` existing. If it does not, the
    /// token is still returned but will never validate.
    pub async fn issue(&self, user_id: i64) -> AppResult<IssuedToken> {
        let claims = self.encoder.claims_for(user_id, Utc::now(), self.ttl)?;
        let expires_at = claims.expires_at();
        let token = self.encoder.encode(&claims)?;

        if !self.users.update_expires_at(user_id, expires_at).await? {
            warn!(user_id, "Issued token for a user with no row; it will not validate");
        }

        info!(user_id, expires_at = %expires_at, "Issued token");
        Ok(IssuedToken { token, expires_at })
    }

    /// Checks already-decoded claims against the clock and the user row.
    ///
    /// Returns `Ok(None)` for any semantically invalid credential. Only
    /// storage failures are errors.
    pub async fn validate(&self, claims: &TokenClaims) -> AppResult<Option<Principal>> {
        match self.check(claims, Utc::now()).await? {
            Ok(principal) => Ok(Some(principal)),
            Err(rejection) => {
                debug!(
                    user_id = ?claims.user_id,
                    reason = rejection.as_str(),
                    "Rejected token"
                );
                Ok(None)
            }
        }
    }

    /// Moves the user's revocation horizon to the epoch, invalidating every
    /// outstanding token. Returns whether a user row was affected.
    pub async fn invalidate(&self, user_id: i64) -> AppResult<bool> {
        let changed = self
            .users
            .update_expires_at(user_id, DateTime::UNIX_EPOCH)
            .await?;

        info!(user_id, changed, "Invalidated all tokens for user");
        Ok(changed)
    }

    /// Decodes and validates a raw credential string.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AuthFailure> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthFailure::MissingCredential);
        }

        let claims = self.decoder.decode(token).map_err(|e| {
            debug!(error = %e.message, "Token failed verification");
            AuthFailure::InvalidToken
        })?;

        self.validate(&claims).await?.ok_or(AuthFailure::Rejected)
    }

    async fn check(
        &self,
        claims: &TokenClaims,
        now: DateTime<Utc>,
    ) -> AppResult<Result<Principal, TokenRejection>> {
        let Some(user_id) = claims.user_id else {
            return Ok(Err(TokenRejection::MissingUserId));
        };

        if claims.is_expired_at(now) {
            return Ok(Err(TokenRejection::Expired));
        }

        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(Err(TokenRejection::UnknownUser));
        };

        if !user.is_active_at(now) {
            return Ok(Err(TokenRejection::Revoked));
        }

        Ok(Ok(Principal {
            user,
            expires_at: claims.expires_at(),
        }))
    }
}

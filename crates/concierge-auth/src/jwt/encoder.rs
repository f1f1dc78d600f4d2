//! JWT signing with the configured issuer and audience.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use concierge_core::config::AuthConfig;
use concierge_core::error::AppError;

use super::claims::TokenClaims;

/// Mints HS256-signed credentials.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Builds the claims for `user_id` issued at `now` and living for `ttl`.
    pub fn claims_for(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<TokenClaims, AppError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::internal("Token expiry is out of range"))?;

        Ok(TokenClaims {
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
            user_id: Some(user_id),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Signs arbitrary claims.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expire_after_ttl() {
        let encoder = JwtEncoder::new(&AuthConfig::default());
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let claims = encoder.claims_for(9, now, Duration::minutes(60)).unwrap();
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
        assert_eq!(claims.user_id, Some(9));
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let encoder = JwtEncoder::new(&AuthConfig::default());
        let err = encoder
            .claims_for(9, DateTime::<Utc>::MAX_UTC, Duration::minutes(1))
            .unwrap_err();
        assert_eq!(err.message, "Token expiry is out of range");
    }
}

//! JWT verification: signature, issuer, and audience.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use concierge_core::config::AuthConfig;
use concierge_core::error::AppError;

use super::claims::TokenClaims;

/// Verifies credentials minted by [`super::JwtEncoder`].
///
/// Expiry is left to the token manager, which checks it
/// together with the per-user revocation horizon.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes a token string, checking signature, issuer, and audience.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => AppError::authentication("Invalid token signature"),
                JwtErrorKind::InvalidIssuer => AppError::authentication("Invalid token issuer"),
                JwtErrorKind::InvalidAudience => AppError::authentication("Invalid token audience"),
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

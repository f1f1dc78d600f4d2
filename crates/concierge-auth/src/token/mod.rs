//! Token lifecycle: minting credentials, validating them against the
//! per-user revocation horizon, and invalidating every outstanding token
//! for a user.

pub mod manager;
pub mod principal;

pub use manager::{AuthFailure, IssuedToken, TokenManager, TokenRejection};
pub use principal::Principal;

//! # concierge-auth
//!
//! Authentication and authorization primitives for Concierge.
//!
//! ## Modules
//!
//! - `jwt`: credential claims plus HS256 signing and verification
//! - `token`: token lifecycle (issue, validate, invalidate)
//! - `rbac`: per-route role policies evaluated against a principal
//! - `password`: Argon2id password hashing

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod token;

pub use jwt::{JwtDecoder, JwtEncoder, TokenClaims};
pub use password::PasswordHasher;
pub use rbac::{Decision, RoutePolicy};
pub use token::{AuthFailure, IssuedToken, Principal, TokenManager};

//! JWT credential claims, signing, and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::TokenClaims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;

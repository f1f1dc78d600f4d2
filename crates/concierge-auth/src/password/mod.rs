//! Password hashing for login and registration.

pub mod hasher;

pub use hasher::PasswordHasher;

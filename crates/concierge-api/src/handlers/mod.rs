//! Request handlers, grouped by route prefix.

pub mod admin;
pub mod auth;
pub mod health;
pub mod user;

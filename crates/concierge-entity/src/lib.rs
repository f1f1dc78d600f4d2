//! # concierge-entity
//!
//! Domain entity models for Concierge. Database entities derive
//! `sqlx::FromRow` in addition to the serde traits.

pub mod user;

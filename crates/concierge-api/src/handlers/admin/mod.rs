//! Admin-only handlers. Routed behind an `ADMIN` role policy.

pub mod users;

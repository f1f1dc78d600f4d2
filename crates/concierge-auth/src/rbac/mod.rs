//! Role-based access policies attached to routes.

pub mod policy;

pub use policy::{Decision, RoutePolicy};

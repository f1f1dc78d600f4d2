//! End-to-end tests over the HTTP router.

mod auth_test;
mod helpers;
mod rbac_test;

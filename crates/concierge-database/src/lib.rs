//! # concierge-database
//!
//! PostgreSQL connection management, migrations, and the [`UserStore`]
//! persistence contract with its Postgres and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::UserRepository;
pub use store::UserStore;

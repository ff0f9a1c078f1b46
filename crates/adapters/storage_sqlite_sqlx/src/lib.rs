//! # devreg-adapter-storage-sqlite-sqlx
//!
//! `SQLite` key-value backend using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `ItemStore` port defined in `devreg-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Store records as `(table, key) -> attribute map` rows
//!
//! ## Dependency rule
//! Depends on `devreg-app` (for port traits) and `devreg-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod item_store;
pub mod pool;

pub use error::StorageError;
pub use item_store::SqliteItemStore;
pub use pool::{Config, Database};

//! SQLite bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing [`SqliteStore`](crate::store::SqliteStore).
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No collection is read or written before migrations succeed.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

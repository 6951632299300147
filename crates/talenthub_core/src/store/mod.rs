//! Backing-store contract and its SQLite implementation.
//!
//! # Responsibility
//! - Define the closed CRUD + query interface every repository talks to.
//! - Ship [`SqliteStore`] as the relational store behind that interface.
//!
//! # Invariants
//! - Stores never interpret domain semantics; they see collections, columns
//!   and JSON values only.
//! - Every backend fault surfaces as [`StoreError`] with the original
//!   message preserved. No retries.

mod query;
mod sqlite;

pub use query::{Embed, Filter, Query, SortDir};
pub use sqlite::SqliteStore;

pub use crate::mapper::Row;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Fault reported by the database engine (connectivity, constraint,
    /// permission, I/O).
    #[error("{0}")]
    Backend(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),
    #[error("unknown field `{field}` in collection `{collection}`")]
    UnknownField { collection: String, field: String },
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("invalid stored value in `{collection}.{column}`: {message}")]
    InvalidData {
        collection: String,
        column: String,
        message: String,
    },
}

/// Opaque CRUD + query store.
///
/// Implementations are single-attempt: they neither retry nor cache.
pub trait StoreClient {
    /// Runs a query and returns matching rows, including embedded relations.
    fn select(&self, query: &Query) -> StoreResult<Vec<Row>>;

    /// Number of rows matching the query filters (order, paging and embeds
    /// are ignored).
    fn count(&self, query: &Query) -> StoreResult<usize>;

    /// Inserts one row and returns it as persisted, generated fields included.
    fn insert(&self, collection: &str, row: Row) -> StoreResult<Row>;

    /// Applies `changes` to the row with primary key `id`.
    ///
    /// Returns `Ok(None)` when no row has that id.
    fn update(&self, collection: &str, id: &str, changes: Row) -> StoreResult<Option<Row>>;

    /// Deletes every row matching all `filters`; returns the number removed.
    fn delete(&self, collection: &str, filters: &[Filter]) -> StoreResult<usize>;

    /// Identifier of the authenticated session user, if any.
    fn current_user(&self) -> Option<String>;
}

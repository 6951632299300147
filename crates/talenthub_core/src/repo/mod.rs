//! Generic collection repository.
//!
//! # Responsibility
//! - Uniform CRUD and equality lookups against one named collection.
//! - Translate "zero rows" into [`RepoError::NotFound`] so callers can tell
//!   a missing record from a store fault.
//!
//! # Invariants
//! - No domain knowledge: rows in, rows out.
//! - Single attempt per call. Store errors propagate unchanged as
//!   [`RepoError::Storage`].

use crate::store::{Filter, Query, Row, StoreClient, StoreError};
use log::{info, warn};
use serde_json::Value;
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{collection} record not found: {key}")]
    NotFound {
        collection: &'static str,
        key: String,
    },
    #[error("{count} {collection} records match {key}, expected exactly one")]
    NotUnique {
        collection: &'static str,
        key: String,
        count: usize,
    },
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// CRUD handle over one collection of a [`StoreClient`].
pub struct Repository<'a, S: StoreClient + ?Sized> {
    store: &'a S,
    collection: &'static str,
}

impl<S: StoreClient + ?Sized> Clone for Repository<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: StoreClient + ?Sized> Copy for Repository<'_, S> {}

impl<'a, S: StoreClient + ?Sized> Repository<'a, S> {
    pub fn new(store: &'a S, collection: &'static str) -> Self {
        Self { store, collection }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Every row of the collection in storage order.
    pub fn get_all(&self) -> RepoResult<Vec<Row>> {
        self.fetch(&self.query())
    }

    pub fn get_by_id(&self, id: &str) -> RepoResult<Row> {
        self.fetch(&self.query().filter(Filter::eq("id", id)).limit(1))?
            .into_iter()
            .next()
            .ok_or_else(|| self.not_found(format!("id={id}")))
    }

    /// Inserts one row; the returned row carries generated fields.
    pub fn create(&self, row: Row) -> RepoResult<Row> {
        let started_at = Instant::now();
        match self.store.insert(self.collection, row) {
            Ok(created) => {
                info!(
                    "event=repo_create module=repo status=ok collection={} id={} duration_ms={}",
                    self.collection,
                    display_id(&created),
                    started_at.elapsed().as_millis()
                );
                Ok(created)
            }
            Err(err) => Err(self.failed("repo_create", started_at, err)),
        }
    }

    /// Partial update by primary key. A missing id is `NotFound`; rows are
    /// never created here.
    pub fn update(&self, id: &str, changes: Row) -> RepoResult<Row> {
        let started_at = Instant::now();
        match self.store.update(self.collection, id, changes) {
            Ok(Some(updated)) => {
                info!(
                    "event=repo_update module=repo status=ok collection={} id={id} duration_ms={}",
                    self.collection,
                    started_at.elapsed().as_millis()
                );
                Ok(updated)
            }
            Ok(None) => {
                warn!(
                    "event=repo_update module=repo status=error collection={} id={id} error_code=not_found",
                    self.collection
                );
                Err(self.not_found(format!("id={id}")))
            }
            Err(err) => Err(self.failed("repo_update", started_at, err)),
        }
    }

    /// Hard delete by primary key. Deleting an absent id succeeds.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.store.delete(self.collection, &[Filter::eq("id", id)]) {
            Ok(removed) => {
                info!(
                    "event=repo_delete module=repo status=ok collection={} id={id} removed={removed} duration_ms={}",
                    self.collection,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => Err(self.failed("repo_delete", started_at, err)),
        }
    }

    pub fn find_by_field(&self, column: &str, value: impl Into<Value>) -> RepoResult<Vec<Row>> {
        self.fetch(&self.query().filter(Filter::eq(column, value)))
    }

    /// Exactly one row must match: zero is `NotFound`, more is `NotUnique`.
    pub fn find_one_by_field(&self, column: &str, value: impl Into<Value>) -> RepoResult<Row> {
        let value = value.into();
        let key = format!("{column}={value}");
        let mut rows = self.find_by_field(column, value)?;
        match rows.len() {
            0 => Err(self.not_found(key)),
            1 => Ok(rows.remove(0)),
            count => Err(RepoError::NotUnique {
                collection: self.collection,
                key,
                count,
            }),
        }
    }

    /// Empty query bound to this collection.
    pub fn query(&self) -> Query {
        Query::new(self.collection)
    }

    pub fn fetch(&self, query: &Query) -> RepoResult<Vec<Row>> {
        Ok(self.store.select(query)?)
    }

    pub fn count(&self, query: &Query) -> RepoResult<usize> {
        Ok(self.store.count(query)?)
    }

    /// Deletes every row matching all filters; returns how many went.
    pub fn delete_matching(&self, filters: &[Filter]) -> RepoResult<usize> {
        let started_at = Instant::now();
        match self.store.delete(self.collection, filters) {
            Ok(removed) => {
                info!(
                    "event=repo_delete module=repo status=ok collection={} removed={removed} duration_ms={}",
                    self.collection,
                    started_at.elapsed().as_millis()
                );
                Ok(removed)
            }
            Err(err) => Err(self.failed("repo_delete", started_at, err)),
        }
    }

    fn not_found(&self, key: String) -> RepoError {
        RepoError::NotFound {
            collection: self.collection,
            key,
        }
    }

    fn failed(&self, event: &str, started_at: Instant, err: StoreError) -> RepoError {
        warn!(
            "event={event} module=repo status=error collection={} duration_ms={} error={}",
            self.collection,
            started_at.elapsed().as_millis(),
            err
        );
        RepoError::Storage(err)
    }
}

fn display_id(row: &Row) -> &str {
    row.get("id").and_then(Value::as_str).unwrap_or("-")
}

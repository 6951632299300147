//! Generic validated CRUD over one entity.

use super::{ServiceError, ServiceResult};
use crate::mapper::Mapper;
use crate::repo::Repository;
use crate::schema::Schema;
use crate::store::{Filter, Query, Row, SortDir, StoreClient};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use uuid::Uuid;

/// Static description of a stored entity: where it lives, how it maps,
/// what it must satisfy.
pub trait Entity {
    /// Domain value read back from the store.
    type Record: DeserializeOwned;
    /// Create payload.
    type New: Serialize;
    /// Partial update payload.
    type Patch: Serialize;

    const NAME: &'static str;
    const COLLECTION: &'static str;
    const MAPPER: Mapper;
    /// Storage columns matched by free-text search.
    const SEARCH_COLUMNS: &'static [&'static str];
    /// Storage ordering for list queries.
    const ORDER: &'static [(&'static str, SortDir)];

    fn schema() -> &'static Schema;
}

/// Validate, map, persist, map back.
pub struct CrudService<'a, S: StoreClient + ?Sized, E: Entity> {
    repo: Repository<'a, S>,
    entity: PhantomData<E>,
}

impl<'a, S: StoreClient + ?Sized, E: Entity> CrudService<'a, S, E> {
    pub fn new(store: &'a S) -> Self {
        Self {
            repo: Repository::new(store, E::COLLECTION),
            entity: PhantomData,
        }
    }

    pub fn repo(&self) -> Repository<'a, S> {
        self.repo
    }

    /// Every record, in list order.
    pub fn get_all(&self) -> ServiceResult<Vec<E::Record>> {
        self.find_by(&self.query())
    }

    pub fn get_by_id(&self, id: Uuid) -> ServiceResult<E::Record> {
        self.decode(&self.repo.get_by_id(&id.to_string())?)
    }

    pub fn create(&self, input: &E::New) -> ServiceResult<E::Record> {
        self.create_value(&self.encode(input)?)
    }

    /// Creates from a loosely typed candidate (camelCase JSON object).
    pub fn create_value(&self, candidate: &Value) -> ServiceResult<E::Record> {
        let record = E::schema().validate(candidate)?;
        let created = self.repo.create(E::MAPPER.record_to_storage(record))?;
        self.decode(&created)
    }

    pub fn update(&self, id: Uuid, patch: &E::Patch) -> ServiceResult<E::Record> {
        self.update_value(id, &self.encode(patch)?)
    }

    /// Partial update from a loosely typed candidate. Explicit `null`
    /// clears an optional field.
    pub fn update_value(&self, id: Uuid, candidate: &Value) -> ServiceResult<E::Record> {
        let record = E::schema().validate_partial(candidate)?;
        let updated = self
            .repo
            .update(&id.to_string(), E::MAPPER.record_to_storage(record))?;
        self.decode(&updated)
    }

    pub fn delete(&self, id: Uuid) -> ServiceResult<()> {
        Ok(self.repo.delete(&id.to_string())?)
    }

    /// Query over the entity's collection with its list ordering applied.
    pub fn query(&self) -> Query {
        E::ORDER
            .iter()
            .fold(self.repo.query(), |query, (column, dir)| {
                query.order_by(*column, *dir)
            })
    }

    pub fn find_by(&self, query: &Query) -> ServiceResult<Vec<E::Record>> {
        self.decode_all(&self.repo.fetch(query)?)
    }

    /// Equality lookup on a storage column, in list order.
    pub fn find_by_field(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> ServiceResult<Vec<E::Record>> {
        self.find_by(&self.query().filter(Filter::eq(column, value)))
    }

    /// Case-insensitive substring match over the entity's search columns.
    pub fn search(&self, text: &str) -> ServiceResult<Vec<E::Record>> {
        let any_column = Filter::or(
            E::SEARCH_COLUMNS
                .iter()
                .map(|column| Filter::contains_text(*column, text)),
        );
        self.find_by(&self.query().filter(any_column))
    }

    pub fn decode(&self, row: &Row) -> ServiceResult<E::Record> {
        E::MAPPER
            .from_storage(row)
            .map_err(|err| ServiceError::invalid_data(E::NAME, err))
    }

    pub fn decode_all(&self, rows: &[Row]) -> ServiceResult<Vec<E::Record>> {
        rows.iter().map(|row| self.decode(row)).collect()
    }

    fn encode<T: Serialize>(&self, value: &T) -> ServiceResult<Value> {
        serde_json::to_value(value).map_err(|err| ServiceError::InvalidData {
            entity: E::NAME,
            message: err.to_string(),
        })
    }
}

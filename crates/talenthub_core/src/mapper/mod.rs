//! Bidirectional transform between domain and storage shapes.
//!
//! # Responsibility
//! - Rename camelCase domain keys to snake_case storage columns and back.
//! - Store grouped sub-objects as flat snake_case JSON blobs.
//! - Normalize storage `null` to an absent domain field.
//!
//! # Invariants
//! - Every known domain field maps to exactly one column.
//! - `from_storage(to_storage(x)) == x` for every valid domain value.
//! - Unknown domain keys and unknown columns are dropped, never guessed.

mod tables;

pub use tables::{
    ACHIEVEMENT_MAPPER, COMPETITION_MAPPER, COMPETITION_PARTICIPANT_MAPPER, EVENT_MAPPER,
    EVENT_PARTICIPANT_MAPPER, PROFILE_MAPPER, REPORT_MAPPER, SUCCESS_STORY_MAPPER, TALENT_MAPPER,
};

use crate::schema::Record;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Storage row: snake_case column name to JSON value.
pub type Row = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("domain value is not an object")]
    NotAnObject,
    #[error("failed to encode domain value: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode storage row: {0}")]
    Decode(#[source] serde_json::Error),
}

/// How a domain field is laid out in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Value stored as-is (scalars, arrays, result lists).
    Plain,
    /// Nested object stored as a JSON blob whose keys are snake_cased.
    Blob,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub domain: &'static str,
    pub column: &'static str,
    pub kind: ColumnKind,
}

impl FieldMapping {
    pub const fn plain(domain: &'static str, column: &'static str) -> Self {
        Self {
            domain,
            column,
            kind: ColumnKind::Plain,
        }
    }

    pub const fn blob(domain: &'static str, column: &'static str) -> Self {
        Self {
            domain,
            column,
            kind: ColumnKind::Blob,
        }
    }
}

/// Pure, stateless field table for one entity.
#[derive(Debug, Clone, Copy)]
pub struct Mapper {
    fields: &'static [FieldMapping],
}

impl Mapper {
    pub const fn new(fields: &'static [FieldMapping]) -> Self {
        Self { fields }
    }

    /// Storage column backing `domain_field`, if mapped.
    pub fn column(&self, domain_field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|field| field.domain == domain_field)
            .map(|field| field.column)
    }

    /// Serializes a domain value and maps it to a storage row.
    pub fn to_storage<T: Serialize>(&self, value: &T) -> Result<Row, MapError> {
        match serde_json::to_value(value).map_err(MapError::Encode)? {
            Value::Object(record) => Ok(self.record_to_storage(record)),
            _ => Err(MapError::NotAnObject),
        }
    }

    /// Maps an already validated domain record. Keys without a mapping are
    /// dropped.
    pub fn record_to_storage(&self, mut record: Record) -> Row {
        let mut row = Row::new();
        for field in self.fields {
            if let Some(value) = record.remove(field.domain) {
                let value = match field.kind {
                    ColumnKind::Plain => value,
                    ColumnKind::Blob => rename_keys(value, camel_to_snake),
                };
                row.insert(field.column.to_string(), value);
            }
        }
        row
    }

    /// Maps a storage row back to the domain record shape.
    pub fn storage_to_record(&self, row: &Row) -> Record {
        let mut record = Record::new();
        for field in self.fields {
            match row.get(field.column) {
                None | Some(Value::Null) => {}
                Some(value) => {
                    let value = match field.kind {
                        ColumnKind::Plain => value.clone(),
                        ColumnKind::Blob => rename_keys(value.clone(), snake_to_camel),
                    };
                    record.insert(field.domain.to_string(), value);
                }
            }
        }
        record
    }

    /// Decodes a storage row into a domain value.
    pub fn from_storage<T: DeserializeOwned>(&self, row: &Row) -> Result<T, MapError> {
        serde_json::from_value(Value::Object(self.storage_to_record(row))).map_err(MapError::Decode)
    }
}

fn rename_keys(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, value)| (rename(&key), value))
                .collect(),
        ),
        other => other,
    }
}

/// `darkMode` -> `dark_mode`.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `dark_mode` -> `darkMode`.
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

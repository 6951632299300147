//! Closed query value consumed by [`StoreClient::select`](super::StoreClient).
//!
//! A query is plain data: collection, predicate list (ANDed), ordering,
//! paging and join expansions. Stores interpret it; callers never build SQL.

use serde_json::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// One predicate over a storage column.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// column = value (`null` matches missing values)
    Eq(String, Value),
    /// array column contains value
    Contains(String, Value),
    /// case-insensitive LIKE; `%` and `_` are wildcards, `\` escapes
    ILike(String, String),
    /// column >= value
    Gte(String, Value),
    /// column <= value
    Lte(String, Value),
    /// column IN (values...)
    In(String, Vec<Value>),
    /// any of the nested predicates
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(column.into(), value.into())
    }

    pub fn contains(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Contains(column.into(), value.into())
    }

    /// Substring match (`%text%`) with wildcard characters in `text`
    /// matched literally.
    pub fn contains_text(column: impl Into<String>, text: &str) -> Self {
        Filter::ILike(column.into(), format!("%{}%", escape_like(text)))
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Gte(column.into(), value.into())
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Lte(column.into(), value.into())
    }

    pub fn is_in(
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        Filter::In(column.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }
}

/// Join expansion: rows of `collection` whose `foreign_key` equals the
/// parent row's `id` are inlined under `alias` as an array.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub collection: String,
    pub foreign_key: String,
    pub alias: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    /// ANDed together.
    pub filters: Vec<Filter>,
    pub order: Vec<(String, SortDir)>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub embeds: Vec<Embed>,
}

impl Query {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            embeds: Vec::new(),
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, dir: SortDir) -> Self {
        self.order.push((column.into(), dir));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn embed(
        mut self,
        collection: impl Into<String>,
        foreign_key: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.embeds.push(Embed {
            collection: collection.into(),
            foreign_key: foreign_key.into(),
            alias: alias.into(),
        });
        self
    }
}

fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

//! SQLite implementation of [`StoreClient`].
//!
//! # Responsibility
//! - Translate [`Query`] values into parameterized SQL.
//! - Generate `id`, `created_at` and `updated_at` for new rows.
//! - Encode array/object values into `JSON` columns and decode them back.
//!
//! # Invariants
//! - Identifiers are checked against the live column catalog before they are
//!   spliced into SQL; values are always bound.
//! - Rows come back exactly as persisted (`RETURNING *`).

use super::{Filter, Query, Row, SortDir, StoreClient, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use crate::model::timestamp;
use log::{debug, error};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

const ID_COLUMN: &str = "id";
const CREATED_AT_COLUMN: &str = "created_at";
const UPDATED_AT_COLUMN: &str = "updated_at";
const FOLD_CASE: &str = "fold_case";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Scalar,
    /// Declared `JSON`: arrays and objects encoded as text.
    Json,
}

impl ColumnType {
    fn from_declared(declared: &str) -> Self {
        if declared.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Scalar
        }
    }
}

#[derive(Debug, Default)]
struct Table {
    columns: HashMap<String, ColumnType>,
}

impl Table {
    fn has(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    fn column(&self, collection: &str, column: &str) -> StoreResult<ColumnType> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| StoreError::UnknownField {
                collection: collection.to_string(),
                field: column.to_string(),
            })
    }
}

/// Relational store over one SQLite connection.
pub struct SqliteStore {
    conn: Connection,
    tables: HashMap<String, Table>,
    session_user: Option<String>,
}

impl SqliteStore {
    /// Opens (or creates) a database file with all migrations applied.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        register_functions(&conn)?;
        let tables = load_catalog(&conn)?;
        Ok(Self {
            conn,
            tables,
            session_user: None,
        })
    }

    pub fn with_session_user(mut self, user: impl Into<String>) -> Self {
        self.session_user = Some(user.into());
        self
    }

    pub fn set_session_user(&mut self, user: Option<String>) {
        self.session_user = user;
    }

    /// Raw connection, for maintenance and diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn table(&self, collection: &str) -> StoreResult<&Table> {
        self.tables
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))
    }

    fn select_rows(&self, query: &Query) -> StoreResult<Vec<Row>> {
        let collection = query.collection.as_str();
        let table = self.table(collection)?;
        for embed in &query.embeds {
            self.table(&embed.collection)?
                .column(&embed.collection, &embed.foreign_key)?;
        }

        let mut sql = format!("SELECT * FROM {}", quote(collection));
        let mut bind_values = Vec::new();
        push_where(collection, table, &query.filters, &mut sql, &mut bind_values)?;

        sql.push_str(" ORDER BY ");
        for (column, dir) in &query.order {
            table.column(collection, column)?;
            let dir = match dir {
                SortDir::Asc => "ASC",
                SortDir::Desc => "DESC",
            };
            sql.push_str(&format!("{} {dir}, ", qualified(collection, column)));
        }
        sql.push_str("rowid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(SqlValue::Integer(i64::from(limit)));
            if let Some(offset) = query.offset {
                sql.push_str(" OFFSET ?");
                bind_values.push(SqlValue::Integer(i64::from(offset)));
            }
        } else if let Some(offset) = query.offset {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(SqlValue::Integer(i64::from(offset)));
        }

        let mut rows = self.read_rows(collection, table, &sql, bind_values)?;

        for embed in &query.embeds {
            for row in rows.iter_mut() {
                let children = match row.get(ID_COLUMN) {
                    Some(id) if !id.is_null() => self.select_rows(
                        &Query::new(embed.collection.as_str())
                            .filter(Filter::Eq(embed.foreign_key.clone(), id.clone())),
                    )?,
                    _ => Vec::new(),
                };
                row.insert(
                    embed.alias.clone(),
                    Value::Array(children.into_iter().map(Value::Object).collect()),
                );
            }
        }

        Ok(rows)
    }

    fn count_rows(&self, query: &Query) -> StoreResult<usize> {
        let collection = query.collection.as_str();
        let table = self.table(collection)?;
        let mut sql = format!("SELECT COUNT(*) FROM {}", quote(collection));
        let mut bind_values = Vec::new();
        push_where(collection, table, &query.filters, &mut sql, &mut bind_values)?;

        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn insert_row(&self, collection: &str, mut row: Row) -> StoreResult<Row> {
        let table = self.table(collection)?;
        let now = timestamp::now();

        if table.has(ID_COLUMN) && row.get(ID_COLUMN).map_or(true, Value::is_null) {
            row.insert(
                ID_COLUMN.to_string(),
                Value::String(Uuid::new_v4().to_string()),
            );
        }
        for column in [CREATED_AT_COLUMN, UPDATED_AT_COLUMN] {
            if table.has(column) && row.get(column).map_or(true, Value::is_null) {
                row.insert(column.to_string(), Value::String(now.clone()));
            }
        }
        if row.is_empty() {
            return Err(StoreError::InvalidQuery(format!(
                "insert into `{collection}` has no columns"
            )));
        }

        let mut columns = Vec::with_capacity(row.len());
        let mut bind_values = Vec::with_capacity(row.len());
        for (column, value) in &row {
            let kind = table.column(collection, column)?;
            columns.push(quote(column));
            bind_values.push(to_sql(collection, column, kind, value)?);
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            quote(collection),
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );
        self.read_rows(collection, table, &sql, bind_values)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                StoreError::InvalidQuery(format!("insert into `{collection}` returned no row"))
            })
    }

    fn update_row(&self, collection: &str, id: &str, mut changes: Row) -> StoreResult<Option<Row>> {
        let table = self.table(collection)?;
        table.column(collection, ID_COLUMN)?;

        changes.remove(ID_COLUMN);
        changes.remove(CREATED_AT_COLUMN);
        if table.has(UPDATED_AT_COLUMN) {
            changes.insert(
                UPDATED_AT_COLUMN.to_string(),
                Value::String(timestamp::now()),
            );
        }
        if changes.is_empty() {
            let query = Query::new(collection).filter(Filter::eq(ID_COLUMN, id));
            return Ok(self.select_rows(&query)?.into_iter().next());
        }

        let mut assignments = Vec::with_capacity(changes.len());
        let mut bind_values = Vec::with_capacity(changes.len() + 1);
        for (column, value) in &changes {
            let kind = table.column(collection, column)?;
            assignments.push(format!("{} = ?", quote(column)));
            bind_values.push(to_sql(collection, column, kind, value)?);
        }
        bind_values.push(SqlValue::Text(id.to_string()));

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ? RETURNING *",
            quote(collection),
            assignments.join(", "),
            quote(ID_COLUMN)
        );
        Ok(self
            .read_rows(collection, table, &sql, bind_values)?
            .into_iter()
            .next())
    }

    fn delete_rows(&self, collection: &str, filters: &[Filter]) -> StoreResult<usize> {
        let table = self.table(collection)?;
        if filters.is_empty() {
            return Err(StoreError::InvalidQuery(format!(
                "delete from `{collection}` requires at least one filter"
            )));
        }

        let mut sql = format!("DELETE FROM {}", quote(collection));
        let mut bind_values = Vec::new();
        push_where(collection, table, filters, &mut sql, &mut bind_values)?;
        Ok(self.conn.execute(&sql, params_from_iter(bind_values))?)
    }

    fn read_rows(
        &self,
        collection: &str,
        table: &Table,
        sql: &str,
        bind_values: Vec<SqlValue>,
    ) -> StoreResult<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut out = Vec::new();

        while let Some(row) = rows.next()? {
            let mut record = Row::new();
            for (index, name) in names.iter().enumerate() {
                let kind = table.columns.get(name).copied().unwrap_or(ColumnType::Scalar);
                let value = from_sql(collection, name, kind, row.get_ref(index)?)?;
                record.insert(name.clone(), value);
            }
            out.push(record);
        }

        Ok(out)
    }
}

impl StoreClient for SqliteStore {
    fn select(&self, query: &Query) -> StoreResult<Vec<Row>> {
        let started_at = Instant::now();
        let result = self.select_rows(query);
        trace("store_select", &query.collection, started_at, &result, Vec::len);
        result
    }

    fn count(&self, query: &Query) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = self.count_rows(query);
        trace("store_count", &query.collection, started_at, &result, |n| *n);
        result
    }

    fn insert(&self, collection: &str, row: Row) -> StoreResult<Row> {
        let started_at = Instant::now();
        let result = self.insert_row(collection, row);
        trace("store_insert", collection, started_at, &result, |_| 1);
        result
    }

    fn update(&self, collection: &str, id: &str, changes: Row) -> StoreResult<Option<Row>> {
        let started_at = Instant::now();
        let result = self.update_row(collection, id, changes);
        trace("store_update", collection, started_at, &result, |row| {
            usize::from(row.is_some())
        });
        result
    }

    fn delete(&self, collection: &str, filters: &[Filter]) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = self.delete_rows(collection, filters);
        trace("store_delete", collection, started_at, &result, |n| *n);
        result
    }

    fn current_user(&self) -> Option<String> {
        self.session_user.clone()
    }
}

fn trace<T>(
    event: &str,
    collection: &str,
    started_at: Instant,
    result: &StoreResult<T>,
    rows: impl FnOnce(&T) -> usize,
) {
    match result {
        Ok(value) => debug!(
            "event={event} module=store status=ok collection={collection} rows={} duration_ms={}",
            rows(value),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event={event} module=store status=error collection={collection} duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
}

fn load_catalog(conn: &Connection) -> StoreResult<HashMap<String, Table>> {
    let mut stmt = conn.prepare(
        "SELECT m.name, p.name, p.type
         FROM sqlite_master AS m
         JOIN pragma_table_info(m.name) AS p
         WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite_%';",
    )?;
    let mut rows = stmt.query([])?;
    let mut tables: HashMap<String, Table> = HashMap::new();

    while let Some(row) = rows.next()? {
        let table: String = row.get(0)?;
        let column: String = row.get(1)?;
        let declared: String = row.get(2)?;
        tables
            .entry(table)
            .or_default()
            .columns
            .insert(column, ColumnType::from_declared(&declared));
    }

    Ok(tables)
}

/// `fold_case(text)`: Unicode lowercase, so `ILike` matches `É` with `é`.
/// SQLite's own `LIKE` only folds ASCII.
fn register_functions(conn: &Connection) -> StoreResult<()> {
    conn.create_scalar_function(
        FOLD_CASE,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Null => None,
                ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                    Some(String::from_utf8_lossy(bytes).to_lowercase())
                }
                ValueRef::Integer(number) => Some(number.to_string()),
                ValueRef::Real(number) => Some(number.to_string()),
            })
        },
    )?;
    Ok(())
}

fn push_where(
    collection: &str,
    table: &Table,
    filters: &[Filter],
    sql: &mut String,
    bind_values: &mut Vec<SqlValue>,
) -> StoreResult<()> {
    for (index, filter) in filters.iter().enumerate() {
        sql.push_str(if index == 0 { " WHERE (" } else { " AND (" });
        push_filter(collection, table, filter, sql, bind_values)?;
        sql.push(')');
    }
    Ok(())
}

fn push_filter(
    collection: &str,
    table: &Table,
    filter: &Filter,
    sql: &mut String,
    bind_values: &mut Vec<SqlValue>,
) -> StoreResult<()> {
    match filter {
        Filter::Eq(column, Value::Null) => {
            table.column(collection, column)?;
            sql.push_str(&format!("{} IS NULL", qualified(collection, column)));
        }
        Filter::Eq(column, value) => {
            push_comparison(collection, table, column, "=", value, sql, bind_values)?
        }
        Filter::Gte(column, value) => {
            push_comparison(collection, table, column, ">=", value, sql, bind_values)?
        }
        Filter::Lte(column, value) => {
            push_comparison(collection, table, column, "<=", value, sql, bind_values)?
        }
        Filter::Contains(column, value) => {
            if table.column(collection, column)? != ColumnType::Json {
                return Err(StoreError::InvalidQuery(format!(
                    "`{collection}.{column}` is not an array column"
                )));
            }
            let element = scalar_to_sql(value).ok_or_else(|| {
                StoreError::InvalidQuery(format!("contains on `{column}` needs a scalar value"))
            })?;
            sql.push_str(&format!(
                "EXISTS (SELECT 1 FROM json_each({}) WHERE json_each.value = ?)",
                qualified(collection, column)
            ));
            bind_values.push(element);
        }
        Filter::ILike(column, pattern) => {
            table.column(collection, column)?;
            sql.push_str(&format!(
                "{FOLD_CASE}({}) LIKE {FOLD_CASE}(?) ESCAPE '\\'",
                qualified(collection, column)
            ));
            bind_values.push(SqlValue::Text(pattern.clone()));
        }
        Filter::In(column, values) => {
            let kind = table.column(collection, column)?;
            if values.is_empty() {
                sql.push_str("0 = 1");
                return Ok(());
            }
            let mut placeholders = Vec::with_capacity(values.len());
            for value in values {
                placeholders.push("?");
                bind_values.push(to_sql(collection, column, kind, value)?);
            }
            sql.push_str(&format!(
                "{} IN ({})",
                qualified(collection, column),
                placeholders.join(", ")
            ));
        }
        Filter::Or(filters) => {
            if filters.is_empty() {
                sql.push_str("0 = 1");
                return Ok(());
            }
            for (index, nested) in filters.iter().enumerate() {
                if index > 0 {
                    sql.push_str(" OR ");
                }
                sql.push('(');
                push_filter(collection, table, nested, sql, bind_values)?;
                sql.push(')');
            }
        }
    }
    Ok(())
}

fn push_comparison(
    collection: &str,
    table: &Table,
    column: &str,
    operator: &str,
    value: &Value,
    sql: &mut String,
    bind_values: &mut Vec<SqlValue>,
) -> StoreResult<()> {
    let kind = table.column(collection, column)?;
    sql.push_str(&format!("{} {operator} ?", qualified(collection, column)));
    bind_values.push(to_sql(collection, column, kind, value)?);
    Ok(())
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn qualified(collection: &str, column: &str) -> String {
    format!("{}.{}", quote(collection), quote(column))
}

fn to_sql(
    collection: &str,
    column: &str,
    kind: ColumnType,
    value: &Value,
) -> StoreResult<SqlValue> {
    match (kind, value) {
        (_, Value::Null) => Ok(SqlValue::Null),
        (ColumnType::Json, value) => serde_json::to_string(value)
            .map(SqlValue::Text)
            .map_err(|err| StoreError::InvalidQuery(err.to_string())),
        (ColumnType::Scalar, value) => scalar_to_sql(value).ok_or_else(|| {
            StoreError::InvalidQuery(format!(
                "`{collection}.{column}` cannot hold an array or object"
            ))
        }),
    }
}

fn scalar_to_sql(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Null => Some(SqlValue::Null),
        Value::Bool(flag) => Some(SqlValue::Integer(i64::from(*flag))),
        Value::Number(number) => number
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| number.as_f64().map(SqlValue::Real)),
        Value::String(text) => Some(SqlValue::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn from_sql(
    collection: &str,
    column: &str,
    kind: ColumnType,
    value: ValueRef<'_>,
) -> StoreResult<Value> {
    let invalid = |message: String| StoreError::InvalidData {
        collection: collection.to_string(),
        column: column.to_string(),
        message,
    };

    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(number) => Ok(Value::from(number)),
        ValueRef::Real(number) => Number::from_f64(number)
            .map(Value::Number)
            .ok_or_else(|| invalid(format!("non-finite number {number}"))),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|err| invalid(err.to_string()))?;
            match kind {
                ColumnType::Json => {
                    serde_json::from_str(text).map_err(|err| invalid(err.to_string()))
                }
                ColumnType::Scalar => Ok(Value::String(text.to_string())),
            }
        }
        ValueRef::Blob(_) => Err(invalid("binary values are not supported".to_string())),
    }
}

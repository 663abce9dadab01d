//! SQLite driver backed by [rusqlite].
//!
//! ```ignore
//! let driver = SqliteDriver::open_in_memory()?;
//! driver.connection().execute_batch(
//!     "CREATE TABLE widget (id INTEGER PRIMARY KEY, name TEXT)",
//! )?;
//! let session = Session::new(Box::new(driver));
//! ```

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};

use crate::driver::Driver;
use crate::error::OrmResult;
use crate::row::Row;
use crate::value::Value;

/// Driver over a single rusqlite [`Connection`].
pub struct SqliteDriver {
    conn: Connection,
}

impl SqliteDriver {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> OrmResult<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> OrmResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection, for schema setup and anything else the
    /// session surface does not cover.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Driver for SqliteDriver {
    fn execute(&self, sql: &str, params: &[Value]) -> OrmResult<u64> {
        let mut stmt = self.conn.prepare(sql)?;
        let changed = stmt.execute(params_from_iter(params.iter().map(to_sqlite)))?;
        Ok(changed as u64)
    }

    fn fetch_rows(&self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        // Names must be collected before `query` borrows the statement.
        let columns: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
        let mut rows = stmt.query(params_from_iter(params.iter().map(to_sqlite)))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut pairs = Vec::with_capacity(columns.len());
            for (i, name) in columns.iter().enumerate() {
                pairs.push((name.clone(), from_sqlite(row.get_ref(i)?)));
            }
            out.push(Row::from_pairs(pairs));
        }
        Ok(out)
    }

    fn last_insert_id(&self) -> OrmResult<Value> {
        Ok(Value::Int(self.conn.last_insert_rowid()))
    }

    fn driver_name(&self) -> &str {
        "sqlite"
    }
}

/// SQLite has no native bool, date, uuid, or json storage classes;
/// those bind as INTEGER or TEXT.
fn to_sqlite(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        Value::Int(i) => rusqlite::types::Value::Integer(*i),
        Value::Float(f) => rusqlite::types::Value::Real(*f),
        Value::Text(s) => rusqlite::types::Value::Text(s.clone()),
        Value::Bytes(b) => rusqlite::types::Value::Blob(b.clone()),
        Value::Date(d) => rusqlite::types::Value::Text(d.to_string()),
        Value::DateTime(t) => rusqlite::types::Value::Text(t.to_rfc3339()),
        Value::Uuid(u) => rusqlite::types::Value::Text(u.to_string()),
        Value::Json(j) => rusqlite::types::Value::Text(j.to_string()),
    }
}

fn from_sqlite(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(r) => Value::Float(r),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    }
}

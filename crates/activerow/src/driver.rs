//! Database driver abstraction.
//!
//! The session layer never talks to a database library directly; it
//! compiles statements and hands them to a [`Driver`]. Adapters stay
//! small: four methods, synchronous, object safe.

use crate::error::OrmResult;
use crate::row::Row;
use crate::value::Value;

/// Connection-level contract the session executes through.
///
/// Implementations take `&self`; drivers that mutate internal state
/// (statement caches, recorded calls in test doubles) use interior
/// mutability.
pub trait Driver: Send {
    /// Execute a statement, returning the number of affected rows.
    fn execute(&self, sql: &str, params: &[Value]) -> OrmResult<u64>;

    /// Run a query and materialize every result row.
    fn fetch_rows(&self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>>;

    /// The row id generated by the most recent INSERT, or
    /// [`Value::Null`] when the backend has no such notion.
    fn last_insert_id(&self) -> OrmResult<Value>;

    /// Driver name, e.g. `"sqlite"` or `"pgsql"`. Decides the
    /// identifier quote character unless configuration overrides it.
    fn driver_name(&self) -> &str;
}

//! Fluent SQL statement builders.
//!
//! One builder per statement kind, all compiling to a SQL string with
//! `?` placeholders plus a parameter list in matching order. Builders
//! only assemble text; execution lives with the session layer.
//!
//! # Usage
//!
//! ```ignore
//! use activerow::qb;
//!
//! // SELECT
//! let (sql, params) = qb::select("widget")
//!     .eq("name", "Fred")
//!     .order_by_desc("age")
//!     .limit(20)
//!     .build();
//!
//! // INSERT
//! let (sql, params) = qb::insert("widget")
//!     .set("name", "Fred")
//!     .set_raw("added", "NOW()")
//!     .build();
//!
//! // UPDATE
//! let (sql, params) = qb::update("widget")
//!     .set("age", 10)
//!     .eq("id", 1)
//!     .build()?;
//!
//! // DELETE
//! let (sql, params) = qb::delete("widget").eq("id", 1).build();
//! ```

mod cond;
mod delete;
mod insert;
mod select;
mod update;

pub use cond::{Cond, CondGroup};
pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::{JoinKind, JoinOn, SelectQb};
pub use update::UpdateQb;

use crate::value::Value;

/// A value destined for an INSERT or UPDATE: either bound as a
/// parameter, or a SQL expression spliced into the statement verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Value(Value),
    Expr(String),
}

impl FieldValue {
    /// Wrap a plain value.
    pub fn value(value: impl Into<Value>) -> Self {
        FieldValue::Value(value.into())
    }

    /// Wrap a SQL expression.
    pub fn expr(expr: impl Into<String>) -> Self {
        FieldValue::Expr(expr.into())
    }

    /// True for the expression variant.
    pub fn is_expr(&self) -> bool {
        matches!(self, FieldValue::Expr(_))
    }
}

/// Create a SELECT builder for the given table.
pub fn select(table: &str) -> SelectQb {
    SelectQb::new(table)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder for the given table.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

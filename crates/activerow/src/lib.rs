//! # activerow
//!
//! A small active-record ORM with a fluent SQL builder.
//!
//! ## Features
//!
//! - **SQL explicit**: statements assemble as plain SQL with positional `?`
//!   placeholders (use the `qb` builders or `raw_query()` to override)
//! - **Active records**: rows hydrate into [`Record`]s that track dirty
//!   fields and write themselves back with the smallest possible statement
//! - **Dialect-aware quoting**: identifiers quote with backticks or double
//!   quotes depending on the driver, configurable per session
//! - **Relationships by convention**: `has_one` / `has_many` / `belongs_to`
//!   / `has_many_through` from table-name conventions, every key overridable
//! - **Session services**: opt-in result cache and query log, structured
//!   trace events for every statement
//!
//! ## Query Builder (qb)
//!
//! The `qb` module builds statements without touching a database:
//!
//! ```ignore
//! use activerow::qb;
//!
//! // SELECT
//! let (sql, params) = qb::select("user")
//!     .eq("status", "active")
//!     .order_by_desc("created_at")
//!     .limit(10)
//!     .build();
//!
//! // INSERT
//! let (sql, params) = qb::insert("user")
//!     .set("username", "alice")
//!     .set_raw("added", "NOW()")
//!     .build();
//!
//! // UPDATE
//! let (sql, params) = qb::update("user")
//!     .set("status", "inactive")
//!     .eq("id", user_id)
//!     .build()?;
//!
//! // DELETE
//! let (sql, params) = qb::delete("user").eq("id", user_id).build();
//! ```
//!
//! ## Sessions
//!
//! A [`Session`] owns a [`Driver`] and runs the same builders against it:
//!
//! ```ignore
//! use activerow::{Session, SqliteDriver};
//!
//! let session = Session::new(Box::new(SqliteDriver::open("app.db")?));
//!
//! let mut user = session.table("user").create();
//! user.set("username", "alice");
//! user.save()?;
//!
//! let found = session.table("user").eq("username", "alice").find_one()?;
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod ident;
pub mod model;
pub mod qb;
pub mod row;
pub mod session;
pub mod value;

mod cache;
mod log;

pub use config::Config;
pub use driver::Driver;
pub use error::{OrmError, OrmResult};
pub use ident::{quote_char_for_driver, quote_identifier};
pub use model::{
    belongs_to, foreign_key_for, has_many, has_many_through, has_one, join_table_for,
    table_name_for,
};
pub use row::{FromValue, Row};
pub use session::{Finder, Record, Session};
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{
    delete, insert, select, update, Cond, CondGroup, DeleteQb, FieldValue, InsertQb, JoinKind,
    JoinOn, SelectQb, UpdateQb,
};

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDriver;

//! Active record session layer.
//!
//! A [`Session`] owns a driver plus the per-session services around it
//! (configuration, result cache, query log) and hands out table-scoped
//! [`Finder`]s. Finders run queries and hydrate [`Record`]s; records
//! track their own dirty fields and write themselves back.
//!
//! ```ignore
//! let session = Session::new(Box::new(driver));
//!
//! let mut widget = session
//!     .table("widget")
//!     .eq("name", "Fred")
//!     .find_one()?
//!     .ok_or_else(|| OrmError::not_found("no Fred"))?;
//!
//! widget.set("age", 10);
//! widget.save()?;
//! ```

mod finder;
mod record;

pub use finder::Finder;
pub use record::Record;

use crate::cache::{cache_key, QueryCache};
use crate::config::Config;
use crate::driver::Driver;
use crate::error::OrmResult;
use crate::log::{bind_for_display, statement_kind, QueryLog};
use crate::row::Row;
use crate::value::Value;

/// One connection's worth of ORM state.
pub struct Session {
    config: Config,
    driver: Box<dyn Driver>,
    cache: QueryCache,
    log: QueryLog,
    quote: char,
}

impl Session {
    /// Open a session over a driver, taking configuration defaults and
    /// the driver's own name for quoting.
    pub fn new(driver: Box<dyn Driver>) -> Self {
        let config = Config::new().driver(driver.driver_name());
        Self::with_config(driver, config)
    }

    /// Open a session with explicit configuration. The configuration's
    /// driver name wins over the driver's when picking a quote
    /// character, as does an explicit `quote_character`.
    pub fn with_config(driver: Box<dyn Driver>, config: Config) -> Self {
        let quote = config.quote_char();
        Self {
            config,
            driver,
            cache: QueryCache::new(),
            log: QueryLog::new(),
            quote,
        }
    }

    /// Start a query against a table.
    pub fn table(&self, table: &str) -> Finder<'_> {
        Finder::new(self, table)
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The identifier quote character this session compiles with.
    pub fn quote_char(&self) -> char {
        self.quote
    }

    /// Run an arbitrary query, bypassing the statement builders but not
    /// the cache or the log.
    pub fn raw_fetch(&self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        self.fetch(sql, params)
    }

    /// Execute an arbitrary statement, returning affected rows.
    pub fn raw_execute(&self, sql: &str, params: &[Value]) -> OrmResult<u64> {
        self.execute(sql, params)
    }

    /// Drop every cached result set.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// The most recent statement, parameters inlined. `None` until the
    /// query log is enabled and a statement runs.
    pub fn last_query(&self) -> Option<String> {
        self.log.last()
    }

    /// Every logged statement, oldest first.
    pub fn query_log(&self) -> Vec<String> {
        self.log.history()
    }

    /// Clear the query log.
    pub fn clear_query_log(&self) {
        self.log.clear();
    }

    // ==================== Dispatch ====================

    pub(crate) fn fetch(&self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        if self.config.enable_cache {
            let key = cache_key(sql, params);
            if let Some(rows) = self.cache.get(key) {
                tracing::trace!(target: "activerow.sql", sql = %sql, "cache hit");
                return Ok(rows);
            }
            self.log_statement(sql, params);
            let rows = self.driver.fetch_rows(sql, params)?;
            self.cache.insert(key, rows.clone());
            return Ok(rows);
        }

        self.log_statement(sql, params);
        self.driver.fetch_rows(sql, params)
    }

    pub(crate) fn execute(&self, sql: &str, params: &[Value]) -> OrmResult<u64> {
        self.log_statement(sql, params);
        self.driver.execute(sql, params)
    }

    pub(crate) fn last_insert_id(&self) -> OrmResult<Value> {
        self.driver.last_insert_id()
    }

    /// Statements log before they run, so failing statements are
    /// recorded too. Cache hits never reach this point.
    fn log_statement(&self, sql: &str, params: &[Value]) {
        tracing::debug!(
            target: "activerow.sql",
            query_type = statement_kind(sql),
            param_count = params.len(),
            sql = %bind_for_display(sql, params),
        );
        if self.config.enable_query_log {
            self.log.record(sql, params);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("driver", &self.driver.driver_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

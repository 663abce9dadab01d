//! Opt-in result cache for SELECT statements.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Mutex;

use crate::row::Row;
use crate::value::Value;

/// Cache key over a statement and its parameters. Parameters hash by
/// their rendered form, so `1` and `"1"` key differently.
pub(crate) fn cache_key(sql: &str, params: &[Value]) -> u64 {
    let mut hasher = DefaultHasher::new();
    sql.hash(&mut hasher);
    for param in params {
        param.render().hash(&mut hasher);
    }
    hasher.finish()
}

/// Result rows keyed by statement.
///
/// Unbounded, and never invalidated by writes: an UPDATE through the
/// same session does not evict earlier SELECT results. Sessions that
/// mix reads and writes call `clear` after writing, or leave the cache
/// disabled.
#[derive(Debug, Default)]
pub(crate) struct QueryCache {
    inner: Mutex<HashMap<u64, Vec<Row>>>,
}

impl QueryCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cached rows for a key, cloned out of the cache.
    pub(crate) fn get(&self, key: u64) -> Option<Vec<Row>> {
        self.inner.lock().unwrap().get(&key).cloned()
    }

    pub(crate) fn insert(&self, key: u64, rows: Vec<Row>) {
        self.inner.lock().unwrap().insert(key, rows);
    }

    pub(crate) fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

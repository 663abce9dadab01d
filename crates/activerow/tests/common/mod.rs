//! Shared test driver that scripts result sets and records every
//! statement asked of it.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use activerow::{Driver, OrmError, OrmResult, Row, Value};

struct FakeInner {
    scripted: VecDeque<Vec<Row>>,
    statements: Vec<(String, Vec<Value>)>,
    last_insert_id: Value,
    affected: u64,
    fail_next: bool,
}

/// Test double for [`Driver`]. Fetches pop scripted result sets in
/// order (empty once the script runs out); every statement is recorded
/// with its parameters.
pub struct FakeDriver {
    inner: Arc<Mutex<FakeInner>>,
}

/// Handle onto a [`FakeDriver`] that stays usable after the driver
/// moves into a session.
#[derive(Clone)]
pub struct FakeHandle {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeDriver {
    pub fn new() -> (Self, FakeHandle) {
        let inner = Arc::new(Mutex::new(FakeInner {
            scripted: VecDeque::new(),
            statements: Vec::new(),
            last_insert_id: Value::Null,
            affected: 1,
            fail_next: false,
        }));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            FakeHandle { inner },
        )
    }
}

impl FakeHandle {
    /// Queue a result set for the next unanswered fetch.
    pub fn script_rows(&self, rows: Vec<Row>) {
        self.inner.lock().unwrap().scripted.push_back(rows);
    }

    /// Queue a single-row result set from (name, value) pairs.
    pub fn script_row(&self, pairs: Vec<(&str, Value)>) {
        self.script_rows(vec![Row::from_pairs(pairs)]);
    }

    pub fn set_last_insert_id(&self, id: impl Into<Value>) {
        self.inner.lock().unwrap().last_insert_id = id.into();
    }

    pub fn set_affected(&self, rows: u64) {
        self.inner.lock().unwrap().affected = rows;
    }

    /// Make the next execute or fetch fail with a database error.
    pub fn fail_next(&self) {
        self.inner.lock().unwrap().fail_next = true;
    }

    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.inner.lock().unwrap().statements.clone()
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .statements
            .iter()
            .map(|(sql, _)| sql.clone())
            .collect()
    }

    pub fn statement_count(&self) -> usize {
        self.inner.lock().unwrap().statements.len()
    }

    pub fn last_statement(&self) -> Option<(String, Vec<Value>)> {
        self.inner.lock().unwrap().statements.last().cloned()
    }
}

impl Driver for FakeDriver {
    fn execute(&self, sql: &str, params: &[Value]) -> OrmResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next {
            inner.fail_next = false;
            return Err(OrmError::database("scripted failure"));
        }
        inner.statements.push((sql.to_string(), params.to_vec()));
        Ok(inner.affected)
    }

    fn fetch_rows(&self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next {
            inner.fail_next = false;
            return Err(OrmError::database("scripted failure"));
        }
        inner.statements.push((sql.to_string(), params.to_vec()));
        Ok(inner.scripted.pop_front().unwrap_or_default())
    }

    fn last_insert_id(&self) -> OrmResult<Value> {
        Ok(self.inner.lock().unwrap().last_insert_id.clone())
    }

    fn driver_name(&self) -> &str {
        "fake"
    }
}

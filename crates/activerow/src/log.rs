//! Session query log.

use std::sync::Mutex;

use crate::value::Value;

/// Leading statement keyword, lowercased, for trace event fields.
pub(crate) fn statement_kind(sql: &str) -> &'static str {
    let trimmed = sql.trim_start();
    for (keyword, kind) in [
        ("SELECT", "select"),
        ("INSERT", "insert"),
        ("UPDATE", "update"),
        ("DELETE", "delete"),
    ] {
        let rest = match trimmed.get(..keyword.len()) {
            Some(head) if head.eq_ignore_ascii_case(keyword) => &trimmed[keyword.len()..],
            _ => continue,
        };
        if !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            return kind;
        }
    }
    "other"
}

/// Inline `?` placeholders with rendered parameter values.
///
/// Display only; executed statements always bind their parameters.
/// Surplus placeholders are left as-is.
pub(crate) fn bind_for_display(sql: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut params = params.iter();
    for ch in sql.chars() {
        if ch == '?' {
            match params.next() {
                Some(value) => out.push_str(&value.render()),
                None => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// In-memory record of executed statements, parameters inlined for
/// readability. Grows without bound while enabled.
#[derive(Debug, Default)]
pub(crate) struct QueryLog {
    inner: Mutex<QueryLogInner>,
}

#[derive(Debug, Default)]
struct QueryLogInner {
    last: Option<String>,
    history: Vec<String>,
}

impl QueryLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, sql: &str, params: &[Value]) {
        let bound = bind_for_display(sql, params);
        let mut inner = self.inner.lock().unwrap();
        inner.last = Some(bound.clone());
        inner.history.push(bound);
    }

    pub(crate) fn last(&self) -> Option<String> {
        self.inner.lock().unwrap().last.clone()
    }

    pub(crate) fn history(&self) -> Vec<String> {
        self.inner.lock().unwrap().history.clone()
    }

    pub(crate) fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.last = None;
        inner.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_kind_reads_the_leading_keyword() {
        assert_eq!(statement_kind("SELECT * FROM t"), "select");
        assert_eq!(statement_kind("  insert into t DEFAULT VALUES"), "insert");
        assert_eq!(statement_kind("UPDATE t SET a = ?"), "update");
        assert_eq!(statement_kind("DELETE FROM t"), "delete");
        assert_eq!(statement_kind("CREATE TABLE t (id INTEGER)"), "other");
        assert_eq!(statement_kind("SELECTED"), "other");
    }

    #[test]
    fn test_bind_inlines_in_order() {
        let bound = bind_for_display(
            "SELECT * FROM `widget` WHERE `name` = ? AND `age` > ?",
            &[Value::Text("Fred".to_string()), Value::Int(18)],
        );
        assert_eq!(
            bound,
            "SELECT * FROM `widget` WHERE `name` = 'Fred' AND `age` > 18"
        );
    }

    #[test]
    fn test_surplus_placeholders_survive() {
        let bound = bind_for_display("`a` = ? AND `b` = ?", &[Value::Int(1)]);
        assert_eq!(bound, "`a` = 1 AND `b` = ?");
    }

    #[test]
    fn test_null_spells_itself() {
        let bound = bind_for_display("`a` = ?", &[Value::Null]);
        assert_eq!(bound, "`a` = NULL");
    }

    #[test]
    fn test_record_keeps_last_and_history() {
        let log = QueryLog::new();
        assert!(log.last().is_none());

        log.record("SELECT 1", &[]);
        log.record("SELECT * FROM `widget` WHERE `id` = ?", &[Value::Int(7)]);

        assert_eq!(
            log.last().as_deref(),
            Some("SELECT * FROM `widget` WHERE `id` = 7")
        );
        let history = log.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], "SELECT 1");

        log.clear();
        assert!(log.last().is_none());
        assert!(log.history().is_empty());
    }
}

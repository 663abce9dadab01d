//! WHERE condition fragments.
//!
//! Each condition renders a SQL snippet with `?` placeholders and appends
//! its bound values to the shared parameter list in the same order, so
//! placeholder position always matches parameter position. Fragments are
//! combined with `AND` in insertion order.

use crate::ident::quote_identifier;
use crate::value::Value;

/// A single WHERE condition.
#[derive(Clone, Debug)]
pub enum Cond {
    /// Simple comparison: `column op ?`
    Compare {
        column: String,
        op: &'static str,
        value: Value,
    },

    /// NULL check: `column IS NULL` or `column IS NOT NULL`
    NullCheck { column: String, is_null: bool },

    /// IN list: `column IN (?, ?, ...)` or `column NOT IN (...)`,
    /// one placeholder per element.
    InList {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },

    /// Raw fragment spliced verbatim; any `?` in it binds the attached
    /// parameters. The column text is not quoted.
    Raw { sql: String, params: Vec<Value> },

    /// Always true. Stands in for `NOT IN ()` over an empty list.
    True,

    /// Always false. Stands in for `IN ()` over an empty list.
    False,
}

impl Cond {
    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "=",
            value: value.into(),
        }
    }

    /// `column != value`
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "!=",
            value: value.into(),
        }
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: ">",
            value: value.into(),
        }
    }

    /// `column >= value`
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: ">=",
            value: value.into(),
        }
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "<",
            value: value.into(),
        }
    }

    /// `column <= value`
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "<=",
            value: value.into(),
        }
    }

    /// `column LIKE pattern`
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "LIKE",
            value: pattern.into(),
        }
    }

    /// `column NOT LIKE pattern`
    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Cond::Compare {
            column: column.into(),
            op: "NOT LIKE",
            value: pattern.into(),
        }
    }

    /// `column IS NULL`
    pub fn is_null(column: impl Into<String>) -> Self {
        Cond::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Cond::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// `column IN (values...)`. An empty list renders the always-false
    /// `1=0` instead of the invalid `IN ()`.
    pub fn in_list<T: Into<Value>>(column: impl Into<String>, values: Vec<T>) -> Self {
        if values.is_empty() {
            return Cond::False;
        }
        Cond::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// `column NOT IN (values...)`. An empty list renders the always-true
    /// `1=1`: excluding nothing matches everything.
    pub fn not_in<T: Into<Value>>(column: impl Into<String>, values: Vec<T>) -> Self {
        if values.is_empty() {
            return Cond::True;
        }
        Cond::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// Raw condition text with `?` placeholders bound to `params`.
    pub fn raw(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Cond::Raw {
            sql: sql.into(),
            params,
        }
    }

    /// Render this condition, quoting identifiers with `quote` and
    /// appending bound values to `params`.
    pub fn render(&self, quote: char, params: &mut Vec<Value>) -> String {
        match self {
            Cond::Compare { column, op, value } => {
                params.push(value.clone());
                format!("{} {} ?", quote_identifier(column, quote), op)
            }
            Cond::NullCheck { column, is_null } => {
                let check = if *is_null { "IS NULL" } else { "IS NOT NULL" };
                format!("{} {}", quote_identifier(column, quote), check)
            }
            Cond::InList {
                column,
                values,
                negated,
            } => {
                let placeholders = vec!["?"; values.len()].join(", ");
                params.extend(values.iter().cloned());
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", quote_identifier(column, quote), op, placeholders)
            }
            Cond::Raw {
                sql,
                params: raw_params,
            } => {
                params.extend(raw_params.iter().cloned());
                sql.clone()
            }
            Cond::True => "1=1".to_string(),
            Cond::False => "1=0".to_string(),
        }
    }
}

/// An ordered list of conditions combined with `AND`.
#[derive(Clone, Debug, Default)]
pub struct CondGroup {
    conds: Vec<Cond>,
}

impl CondGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self { conds: Vec::new() }
    }

    /// Check if the group has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conds.is_empty()
    }

    /// Append a condition.
    pub fn push(&mut self, cond: Cond) {
        self.conds.push(cond);
    }

    /// Render the WHERE clause content (without the `WHERE` keyword) and
    /// the parameters it binds, in placeholder order.
    pub fn build(&self, quote: char) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        if self.conds.is_empty() {
            return (String::new(), params);
        }
        let parts: Vec<String> = self
            .conds
            .iter()
            .map(|c| c.render(quote, &mut params))
            .collect();
        (parts.join(" AND "), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_one(cond: Cond) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let sql = cond.render('`', &mut params);
        (sql, params)
    }

    #[test]
    fn test_simple_eq() {
        let (sql, params) = build_one(Cond::eq("name", "Fred"));
        assert_eq!(sql, "`name` = ?");
        assert_eq!(params, vec![Value::Text("Fred".to_string())]);
    }

    #[test]
    fn test_dotted_column_quotes_both_parts() {
        let (sql, _) = build_one(Cond::gt("widget.age", 18));
        assert_eq!(sql, "`widget`.`age` > ?");
    }

    #[test]
    fn test_in_list_one_placeholder_per_value() {
        let (sql, params) = build_one(Cond::in_list("id", vec![1, 2, 3]));
        assert_eq!(sql, "`id` IN (?, ?, ?)");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_empty_in_list_is_always_false() {
        let (sql, params) = build_one(Cond::in_list::<i64>("id", vec![]));
        assert_eq!(sql, "1=0");
        assert!(params.is_empty());
    }

    #[test]
    fn test_empty_not_in_list_is_always_true() {
        let (sql, params) = build_one(Cond::not_in::<i64>("id", vec![]));
        assert_eq!(sql, "1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_null_checks_bind_nothing() {
        let (sql, params) = build_one(Cond::is_null("deleted_at"));
        assert_eq!(sql, "`deleted_at` IS NULL");
        assert!(params.is_empty());

        let (sql, _) = build_one(Cond::is_not_null("deleted_at"));
        assert_eq!(sql, "`deleted_at` IS NOT NULL");
    }

    #[test]
    fn test_raw_passes_through_unquoted() {
        let (sql, params) = build_one(Cond::raw(
            "age = ? OR age = ?",
            vec![Value::Int(5), Value::Int(10)],
        ));
        assert_eq!(sql, "age = ? OR age = ?");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_group_joins_with_and_in_insertion_order() {
        let mut group = CondGroup::new();
        group.push(Cond::eq("status", "active"));
        group.push(Cond::gt("age", 18));
        group.push(Cond::in_list("role", vec!["admin", "user"]));

        let (sql, params) = group.build('`');
        assert_eq!(
            sql,
            "`status` = ? AND `age` > ? AND `role` IN (?, ?)"
        );
        assert_eq!(params.len(), 4);
        assert_eq!(params[0], Value::Text("active".to_string()));
        assert_eq!(params[3], Value::Text("user".to_string()));
    }

    #[test]
    fn test_empty_group_builds_nothing() {
        let (sql, params) = CondGroup::new().build('`');
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }
}

//! DELETE statement builder.

use crate::ident::quote_identifier;
use crate::qb::cond::{Cond, CondGroup};
use crate::value::Value;

/// Fluent DELETE builder.
///
/// With no conditions the statement deletes every row in the table;
/// callers that want a guard add their own conditions.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    table: String,
    where_group: CondGroup,
    quote: char,
}

impl DeleteQb {
    /// Create a builder for a table, quoting identifiers with backticks.
    pub fn new(table: &str) -> Self {
        Self::with_quote(table, '`')
    }

    /// Create a builder with an explicit identifier quote character.
    pub fn with_quote(table: &str, quote: char) -> Self {
        Self {
            table: table.to_string(),
            where_group: CondGroup::new(),
            quote,
        }
    }

    /// Create a builder seeded with conditions collected elsewhere.
    pub(crate) fn from_conditions(table: &str, quote: char, where_group: CondGroup) -> Self {
        Self {
            table: table.to_string(),
            where_group,
            quote,
        }
    }

    /// WHERE `column = value`
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.where_group.push(Cond::eq(column, value));
        self
    }

    /// WHERE `column != value`
    pub fn ne(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.where_group.push(Cond::ne(column, value));
        self
    }

    /// WHERE `column > value`
    pub fn gt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.where_group.push(Cond::gt(column, value));
        self
    }

    /// WHERE `column >= value`
    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.where_group.push(Cond::gte(column, value));
        self
    }

    /// WHERE `column < value`
    pub fn lt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.where_group.push(Cond::lt(column, value));
        self
    }

    /// WHERE `column <= value`
    pub fn lte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.where_group.push(Cond::lte(column, value));
        self
    }

    /// WHERE `column IN (values...)`; empty list compiles to `1=0`.
    pub fn in_list<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.where_group.push(Cond::in_list(column, values));
        self
    }

    /// WHERE `column NOT IN (values...)`; empty list compiles to `1=1`.
    pub fn not_in<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.where_group.push(Cond::not_in(column, values));
        self
    }

    /// WHERE `column IS NULL`
    pub fn is_null(mut self, column: &str) -> Self {
        self.where_group.push(Cond::is_null(column));
        self
    }

    /// WHERE `column IS NOT NULL`
    pub fn is_not_null(mut self, column: &str) -> Self {
        self.where_group.push(Cond::is_not_null(column));
        self
    }

    /// Raw WHERE fragment with `?` placeholders bound to `params`.
    pub fn where_raw(mut self, sql: &str, params: Vec<Value>) -> Self {
        self.where_group.push(Cond::raw(sql, params));
        self
    }

    /// Append an already-constructed condition.
    pub fn where_cond(mut self, cond: Cond) -> Self {
        self.where_group.push(cond);
        self
    }

    /// Compile the statement and its parameters.
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut sql = format!(
            "DELETE FROM {}",
            quote_identifier(&self.table, self.quote)
        );
        let (where_sql, params) = self.where_group.build(self.quote);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        (sql, params)
    }

    /// The compiled SQL string (for debugging and tests).
    pub fn to_sql(&self) -> String {
        self.build().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_by_id() {
        let (sql, params) = DeleteQb::new("widget").eq("id", 1).build();
        assert_eq!(sql, "DELETE FROM `widget` WHERE `id` = ?");
        assert_eq!(params, vec![Value::Int(1)]);
    }

    #[test]
    fn test_delete_without_conditions_targets_the_whole_table() {
        let (sql, params) = DeleteQb::new("widget").build();
        assert_eq!(sql, "DELETE FROM `widget`");
        assert!(params.is_empty());
    }

    #[test]
    fn test_delete_with_in_list() {
        let (sql, params) = DeleteQb::new("widget").in_list("id", vec![1, 2, 3]).build();
        assert_eq!(sql, "DELETE FROM `widget` WHERE `id` IN (?, ?, ?)");
        assert_eq!(params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_empty_in_list_matches_nothing() {
        let (sql, params) = DeleteQb::new("widget")
            .in_list("id", Vec::<i64>::new())
            .build();
        assert_eq!(sql, "DELETE FROM `widget` WHERE 1=0");
        assert!(params.is_empty());
    }
}

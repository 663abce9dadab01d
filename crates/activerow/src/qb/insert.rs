//! INSERT statement builder.

use crate::ident::quote_identifier;
use crate::qb::FieldValue;
use crate::value::Value;

/// Fluent INSERT builder.
///
/// Column order follows `set` call order. A builder with no fields
/// compiles to `INSERT INTO t DEFAULT VALUES`.
#[derive(Clone, Debug)]
pub struct InsertQb {
    table: String,
    fields: Vec<(String, FieldValue)>,
    quote: char,
}

impl InsertQb {
    /// Create a builder for a table, quoting identifiers with backticks.
    pub fn new(table: &str) -> Self {
        Self::with_quote(table, '`')
    }

    /// Create a builder with an explicit identifier quote character.
    pub fn with_quote(table: &str, quote: char) -> Self {
        Self {
            table: table.to_string(),
            fields: Vec::new(),
            quote,
        }
    }

    /// Set a column to a parameterized value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.fields
            .push((column.to_string(), FieldValue::Value(value.into())));
        self
    }

    /// Set an optional column value (None => skip).
    pub fn set_opt(self, column: &str, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.set(column, value)
        } else {
            self
        }
    }

    /// Set a column to a raw SQL expression, spliced without binding.
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        self.fields
            .push((column.to_string(), FieldValue::Expr(expr.to_string())));
        self
    }

    /// Set a column from an already-classified field value.
    pub fn set_field(mut self, column: &str, field: FieldValue) -> Self {
        self.fields.push((column.to_string(), field));
        self
    }

    /// Compile the statement and its parameters.
    pub fn build(&self) -> (String, Vec<Value>) {
        let table = quote_identifier(&self.table, self.quote);
        if self.fields.is_empty() {
            return (format!("INSERT INTO {} DEFAULT VALUES", table), Vec::new());
        }

        let mut params = Vec::new();
        let mut columns = Vec::new();
        let mut placeholders = Vec::new();
        for (column, field) in &self.fields {
            columns.push(quote_identifier(column, self.quote));
            match field {
                FieldValue::Value(value) => {
                    placeholders.push("?".to_string());
                    params.push(value.clone());
                }
                FieldValue::Expr(expr) => placeholders.push(expr.clone()),
            }
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        );
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
    fn test_simple_insert() {
        let (sql, params) = InsertQb::new("widget")
            .set("name", "Fred")
            .set("age", 10)
            .build();
        assert_eq!(sql, "INSERT INTO `widget` (`name`, `age`) VALUES (?, ?)");
        assert_eq!(
            params,
            vec![Value::Text("Fred".to_string()), Value::Int(10)]
        );
    }

    #[test]
    fn test_raw_expressions_splice_without_binding() {
        let (sql, params) = InsertQb::new("widget")
            .set("name", "Fred")
            .set_raw("added", "NOW()")
            .build();
        assert_eq!(sql, "INSERT INTO `widget` (`name`, `added`) VALUES (?, NOW())");
        assert_eq!(params, vec![Value::Text("Fred".to_string())]);
    }

    #[test]
    fn test_no_fields_compiles_to_default_values() {
        let (sql, params) = InsertQb::new("audit_log").build();
        assert_eq!(sql, "INSERT INTO `audit_log` DEFAULT VALUES");
        assert!(params.is_empty());
    }

    #[test]
    fn test_set_opt_skips_none() {
        let qb = InsertQb::new("widget")
            .set("name", "Fred")
            .set_opt("age", Option::<i64>::None);
        assert_eq!(qb.to_sql(), "INSERT INTO `widget` (`name`) VALUES (?)");
    }

    #[test]
    fn test_double_quote_dialect() {
        let qb = InsertQb::with_quote("widget", '"').set("name", "Fred");
        assert_eq!(qb.to_sql(), "INSERT INTO \"widget\" (\"name\") VALUES (?)");
    }
}

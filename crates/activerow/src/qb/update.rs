//! UPDATE statement builder.

use crate::error::{OrmError, OrmResult};
use crate::ident::quote_identifier;
use crate::qb::cond::{Cond, CondGroup};
use crate::qb::FieldValue;
use crate::value::Value;

/// Fluent UPDATE builder.
///
/// SET clauses render in call order; their parameters come before any
/// WHERE parameters. Compiling with no SET fields is an error.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    table: String,
    sets: Vec<(String, FieldValue)>,
    where_group: CondGroup,
    quote: char,
}

impl UpdateQb {
    /// Create a builder for a table, quoting identifiers with backticks.
    pub fn new(table: &str) -> Self {
        Self::with_quote(table, '`')
    }

    /// Create a builder with an explicit identifier quote character.
    pub fn with_quote(table: &str, quote: char) -> Self {
        Self {
            table: table.to_string(),
            sets: Vec::new(),
            where_group: CondGroup::new(),
            quote,
        }
    }

    /// Set a column to a parameterized value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.sets
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
        self.sets
            .push((column.to_string(), FieldValue::Expr(expr.to_string())));
        self
    }

    /// Set a column from an already-classified field value.
    pub fn set_field(mut self, column: &str, field: FieldValue) -> Self {
        self.sets.push((column.to_string(), field));
        self
    }

    // ==================== WHERE conditions ====================

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

    // ==================== Build ====================

    /// Compile the statement and its parameters.
    pub fn build(&self) -> OrmResult<(String, Vec<Value>)> {
        if self.sets.is_empty() {
            return Err(OrmError::build("UPDATE requires at least one SET field"));
        }

        let mut params = Vec::new();
        let mut set_parts = Vec::new();
        for (column, field) in &self.sets {
            let column = quote_identifier(column, self.quote);
            match field {
                FieldValue::Value(value) => {
                    set_parts.push(format!("{} = ?", column));
                    params.push(value.clone());
                }
                FieldValue::Expr(expr) => set_parts.push(format!("{} = {}", column, expr)),
            }
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            quote_identifier(&self.table, self.quote),
            set_parts.join(", ")
        );

        let (where_sql, where_params) = self.where_group.build(self.quote);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        params.extend(where_params);

        Ok((sql, params))
    }

    /// The compiled SQL string (for debugging and tests).
    pub fn to_sql(&self) -> OrmResult<String> {
        self.build().map(|(sql, _)| sql)
    }
}

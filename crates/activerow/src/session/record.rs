//! A single database row with write-back.

use serde::Serialize;

use crate::error::{OrmError, OrmResult};
use crate::qb::{DeleteQb, FieldValue, InsertQb, UpdateQb};
use crate::row::{FromValue, Row};
use crate::session::Session;
use crate::value::Value;

/// One row of one table, tracking which fields changed since it was
/// hydrated.
///
/// Saving synthesizes the smallest statement that covers the dirty
/// fields: INSERT for records that never hit the database, UPDATE by
/// primary key otherwise. A failed save keeps the dirty set intact so
/// the caller can retry.
#[derive(Debug)]
pub struct Record<'s> {
    session: &'s Session,
    table: String,
    id_column: String,
    values: Row,
    /// Field names changed since hydration, in first-write order.
    dirty: Vec<String>,
    /// Dirty fields whose value is a SQL expression, not a parameter.
    expr_fields: Vec<String>,
    is_new: bool,
}

impl<'s> Record<'s> {
    pub(crate) fn hydrated(
        session: &'s Session,
        table: String,
        id_column: String,
        values: Row,
    ) -> Self {
        Self {
            session,
            table,
            id_column,
            values,
            dirty: Vec::new(),
            expr_fields: Vec::new(),
            is_new: false,
        }
    }

    pub(crate) fn fresh(session: &'s Session, table: String, id_column: String) -> Self {
        Self {
            session,
            table,
            id_column,
            values: Row::new(),
            dirty: Vec::new(),
            expr_fields: Vec::new(),
            is_new: true,
        }
    }

    pub(crate) fn session(&self) -> &'s Session {
        self.session
    }

    // ==================== Reads ====================

    /// The table this record belongs to.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The primary key column this record resolves against.
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// True until the first successful save.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// A field's current value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// A field's value converted to a concrete type.
    pub fn get_as<T: FromValue>(&self, field: &str) -> OrmResult<T> {
        self.values.get_as(field)
    }

    /// The primary key value; `None` when absent or NULL.
    pub fn id(&self) -> Option<&Value> {
        self.values.get(&self.id_column).filter(|v| !v.is_null())
    }

    /// Whether a field changed since hydration.
    pub fn is_dirty(&self, field: &str) -> bool {
        self.dirty.iter().any(|f| f == field)
    }

    /// Names of changed fields, in first-write order.
    pub fn dirty_fields(&self) -> &[String] {
        &self.dirty
    }

    /// All fields, in hydration/write order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter()
    }

    /// The underlying row.
    pub fn row(&self) -> &Row {
        &self.values
    }

    /// Give up the record, keeping its row.
    pub fn into_row(self) -> Row {
        self.values
    }

    // ==================== Writes ====================

    fn mark_dirty(&mut self, field: &str) {
        if !self.dirty.iter().any(|f| f == field) {
            self.dirty.push(field.to_string());
        }
    }

    /// Set a field to a plain value. Undoes any earlier `set_expr` on
    /// the same field.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.values.set(field, value.into());
        self.mark_dirty(field);
        self.expr_fields.retain(|f| f != field);
    }

    /// Set several fields at once.
    pub fn set_multi(&mut self, fields: &[(&str, Value)]) {
        for (field, value) in fields {
            self.set(field, value.clone());
        }
    }

    /// Set a field to a SQL expression, spliced into the statement at
    /// save time instead of bound as a parameter.
    pub fn set_expr(&mut self, field: &str, expr: &str) {
        self.values.set(field, Value::Text(expr.to_string()));
        self.mark_dirty(field);
        if !self.expr_fields.iter().any(|f| f == field) {
            self.expr_fields.push(field.to_string());
        }
    }

    /// Serialize a value into a JSON field.
    pub fn set_json<T: Serialize>(&mut self, field: &str, value: &T) -> OrmResult<()> {
        let json = serde_json::to_value(value)
            .map_err(|e| OrmError::decode(field, e.to_string()))?;
        self.set(field, Value::Json(json));
        Ok(())
    }

    // ==================== Persistence ====================

    fn dirty_field_values(&self) -> Vec<(String, FieldValue)> {
        self.dirty
            .iter()
            .map(|field| {
                let value = self.values.get(field).cloned().unwrap_or(Value::Null);
                let field_value = if self.expr_fields.iter().any(|f| f == field) {
                    match value {
                        Value::Text(expr) => FieldValue::Expr(expr),
                        // set_expr only stores text; anything else
                        // binds as a plain parameter.
                        other => FieldValue::Value(other),
                    }
                } else {
                    FieldValue::Value(value)
                };
                (field.clone(), field_value)
            })
            .collect()
    }

    /// Write dirty fields back to the database.
    ///
    /// Returns `Ok(false)` when there was nothing to do: an existing
    /// record with no dirty fields. A brand-new record always inserts,
    /// even with no fields set (`INSERT INTO t DEFAULT VALUES`), and
    /// adopts the driver's last insert id when its own is absent. The
    /// dirty set clears only after the statement succeeds.
    pub fn save(&mut self) -> OrmResult<bool> {
        if !self.is_new && self.dirty.is_empty() {
            return Ok(false);
        }

        let quote = self.session.quote_char();
        let fields = self.dirty_field_values();

        if self.is_new {
            let mut qb = InsertQb::with_quote(&self.table, quote);
            for (field, value) in fields {
                qb = qb.set_field(&field, value);
            }
            let (sql, params) = qb.build();
            self.session.execute(&sql, &params)?;
            self.is_new = false;
            if self.id().is_none() {
                let id = self.session.last_insert_id()?;
                if !id.is_null() {
                    let column = self.id_column.clone();
                    self.values.set(&column, id);
                }
            }
        } else {
            let id = self.id().cloned().ok_or_else(|| {
                OrmError::build(format!(
                    "cannot update `{}` without a value in `{}`",
                    self.table, self.id_column
                ))
            })?;
            let mut qb = UpdateQb::with_quote(&self.table, quote);
            for (field, value) in fields {
                qb = qb.set_field(&field, value);
            }
            let (sql, params) = qb.eq(&self.id_column, id).build()?;
            self.session.execute(&sql, &params)?;
        }

        self.dirty.clear();
        self.expr_fields.clear();
        Ok(true)
    }

    /// Delete this record's row by primary key.
    pub fn delete(self) -> OrmResult<u64> {
        let id = self.id().cloned().ok_or_else(|| {
            OrmError::build(format!(
                "cannot delete from `{}` without a value in `{}`",
                self.table, self.id_column
            ))
        })?;
        let qb = DeleteQb::with_quote(&self.table, self.session.quote_char())
            .eq(&self.id_column, id);
        let (sql, params) = qb.build();
        self.session.execute(&sql, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testing::NullDriver;

    fn session() -> Session {
        Session::new(Box::new(NullDriver))
    }

    fn hydrated<'s>(session: &'s Session, pairs: Vec<(&str, Value)>) -> Record<'s> {
        Record::hydrated(
            session,
            "widget".to_string(),
            "id".to_string(),
            Row::from_pairs(pairs),
        )
    }

    #[test]
    fn test_set_marks_dirty_in_first_write_order() {
        let session = session();
        let mut record = hydrated(&session, vec![("id", Value::Int(1))]);
        record.set("b", 2);
        record.set("a", 1);
        record.set("b", 3);
        assert_eq!(record.dirty_fields(), ["b".to_string(), "a".to_string()]);
        assert_eq!(record.get("b"), Some(&Value::Int(3)));
        assert!(record.is_dirty("a"));
        assert!(!record.is_dirty("id"));
    }

    #[test]
    fn test_plain_set_reverts_an_expression() {
        let session = session();
        let mut record = hydrated(&session, vec![("id", Value::Int(1))]);
        record.set_expr("added", "NOW()");
        record.set("added", "2024-01-01");

        let fields = record.dirty_field_values();
        assert_eq!(fields.len(), 1);
        assert!(!fields[0].1.is_expr());
    }

    #[test]
    fn test_expression_wins_when_set_last() {
        let session = session();
        let mut record = hydrated(&session, vec![("id", Value::Int(1))]);
        record.set("added", "2024-01-01");
        record.set_expr("added", "NOW()");

        let fields = record.dirty_field_values();
        assert_eq!(fields[0].1, FieldValue::Expr("NOW()".to_string()));
    }

    #[test]
    fn test_clean_existing_record_saves_as_noop() {
        let session = session();
        let mut record = hydrated(&session, vec![("id", Value::Int(1))]);
        assert_eq!(record.save().unwrap(), false);
    }

    #[test]
    fn test_save_transitions_new_to_existing_and_clears_dirty() {
        let session = session();
        let mut record = Record::fresh(&session, "widget".to_string(), "id".to_string());
        assert!(record.is_new());

        record.set("name", "Fred");
        assert_eq!(record.save().unwrap(), true);
        assert!(!record.is_new());
        assert!(record.dirty_fields().is_empty());
    }

    #[test]
    fn test_id_ignores_null() {
        let session = session();
        let record = hydrated(&session, vec![("id", Value::Null)]);
        assert!(record.id().is_none());
    }

    #[test]
    fn test_delete_without_id_is_an_error() {
        let session = session();
        let record = Record::fresh(&session, "widget".to_string(), "id".to_string());
        let err = record.delete().unwrap_err();
        assert!(matches!(err, OrmError::Build(_)));
    }

    #[test]
    fn test_typed_reads_go_through_the_row() {
        let session = session();
        let record = hydrated(
            &session,
            vec![("id", Value::Int(1)), ("name", Value::Text("Fred".into()))],
        );
        assert_eq!(record.get_as::<String>("name").unwrap(), "Fred");
        assert_eq!(record.get_as::<i64>("id").unwrap(), 1);
    }
}

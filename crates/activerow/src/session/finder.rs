//! Table-scoped query entry point.

use crate::error::OrmResult;
use crate::ident::quote_identifier;
use crate::qb::{Cond, DeleteQb, JoinKind, JoinOn, SelectQb};
use crate::row::Row;
use crate::session::{Record, Session};
use crate::value::Value;

/// A fluent query against one table, bound to a [`Session`].
///
/// Carries a SELECT builder and adds what the builder alone cannot do:
/// execution, record hydration, aggregates, and bulk delete. Methods
/// consume and return the finder, so queries chain.
#[derive(Debug)]
pub struct Finder<'s> {
    session: &'s Session,
    qb: SelectQb,
    table: String,
    id_column: Option<String>,
}

impl<'s> Finder<'s> {
    pub(crate) fn new(session: &'s Session, table: &str) -> Self {
        Self {
            session,
            qb: SelectQb::with_quote(table, session.quote_char()),
            table: table.to_string(),
            id_column: None,
        }
    }

    /// Override the primary key column for this query and the records
    /// it hydrates. Takes precedence over configuration.
    pub fn use_id_column(mut self, column: &str) -> Self {
        self.id_column = Some(column.to_string());
        self
    }

    fn resolved_id_column(&self) -> String {
        match &self.id_column {
            Some(column) => column.clone(),
            None => self.session.config().id_column_for(&self.table).to_string(),
        }
    }

    // ==================== Result columns ====================

    /// Add a result column, quoted.
    pub fn select(mut self, column: &str) -> Self {
        self.qb = self.qb.select(column);
        self
    }

    /// Add a result column with an alias.
    pub fn select_as(mut self, column: &str, alias: &str) -> Self {
        self.qb = self.qb.select_as(column, alias);
        self
    }

    /// Add several result columns at once.
    pub fn select_many(mut self, columns: &[&str]) -> Self {
        self.qb = self.qb.select_many(columns);
        self
    }

    /// Add an unquoted expression to the result columns.
    pub fn select_expr(mut self, expr: &str) -> Self {
        self.qb = self.qb.select_expr(expr);
        self
    }

    /// Add an unquoted expression with an alias.
    pub fn select_expr_as(mut self, expr: &str, alias: &str) -> Self {
        self.qb = self.qb.select_expr_as(expr, alias);
        self
    }

    /// Prefix the column list with DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.qb = self.qb.distinct();
        self
    }

    /// Alias the main table.
    pub fn alias(mut self, alias: &str) -> Self {
        self.qb = self.qb.alias(alias);
        self
    }

    // ==================== Joins ====================

    /// Add a plain JOIN.
    pub fn join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.qb = self.qb.join(table, on);
        self
    }

    /// Add an INNER JOIN.
    pub fn inner_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.qb = self.qb.inner_join(table, on);
        self
    }

    /// Add a LEFT OUTER JOIN.
    pub fn left_outer_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.qb = self.qb.left_outer_join(table, on);
        self
    }

    /// Add a RIGHT OUTER JOIN.
    pub fn right_outer_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.qb = self.qb.right_outer_join(table, on);
        self
    }

    /// Add a FULL OUTER JOIN.
    pub fn full_outer_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.qb = self.qb.full_outer_join(table, on);
        self
    }

    /// Add a join of any kind with an alias for the joined table.
    pub fn join_as(mut self, kind: JoinKind, table: &str, on: impl Into<JoinOn>, alias: &str) -> Self {
        self.qb = self.qb.join_as(kind, table, on, alias);
        self
    }

    // ==================== WHERE conditions ====================

    /// WHERE `column = value`
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.qb = self.qb.eq(column, value);
        self
    }

    /// WHERE `column != value`
    pub fn ne(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.qb = self.qb.ne(column, value);
        self
    }

    /// WHERE `column > value`
    pub fn gt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.qb = self.qb.gt(column, value);
        self
    }

    /// WHERE `column >= value`
    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.qb = self.qb.gte(column, value);
        self
    }

    /// WHERE `column < value`
    pub fn lt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.qb = self.qb.lt(column, value);
        self
    }

    /// WHERE `column <= value`
    pub fn lte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.qb = self.qb.lte(column, value);
        self
    }

    /// WHERE `column LIKE pattern`
    pub fn like(mut self, column: &str, pattern: impl Into<Value>) -> Self {
        self.qb = self.qb.like(column, pattern);
        self
    }

    /// WHERE `column NOT LIKE pattern`
    pub fn not_like(mut self, column: &str, pattern: impl Into<Value>) -> Self {
        self.qb = self.qb.not_like(column, pattern);
        self
    }

    /// WHERE `column IS NULL`
    pub fn is_null(mut self, column: &str) -> Self {
        self.qb = self.qb.is_null(column);
        self
    }

    /// WHERE `column IS NOT NULL`
    pub fn is_not_null(mut self, column: &str) -> Self {
        self.qb = self.qb.is_not_null(column);
        self
    }

    /// WHERE `column IN (values...)`
    pub fn in_list<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.qb = self.qb.in_list(column, values);
        self
    }

    /// WHERE `column NOT IN (values...)`
    pub fn not_in<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> Self {
        self.qb = self.qb.not_in(column, values);
        self
    }

    /// Raw WHERE fragment with `?` placeholders bound to `params`.
    pub fn where_raw(mut self, sql: &str, params: Vec<Value>) -> Self {
        self.qb = self.qb.where_raw(sql, params);
        self
    }

    /// Append an already-constructed condition.
    pub fn where_cond(mut self, cond: Cond) -> Self {
        self.qb = self.qb.where_cond(cond);
        self
    }

    // ==================== Ordering & pagination ====================

    /// ORDER BY `column` ASC.
    pub fn order_by_asc(mut self, column: &str) -> Self {
        self.qb = self.qb.order_by_asc(column);
        self
    }

    /// ORDER BY `column` DESC.
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.qb = self.qb.order_by_desc(column);
        self
    }

    /// ORDER BY an unquoted expression.
    pub fn order_by_expr(mut self, expr: &str) -> Self {
        self.qb = self.qb.order_by_expr(expr);
        self
    }

    /// GROUP BY a quoted column.
    pub fn group_by(mut self, column: &str) -> Self {
        self.qb = self.qb.group_by(column);
        self
    }

    /// GROUP BY an unquoted expression.
    pub fn group_by_expr(mut self, expr: &str) -> Self {
        self.qb = self.qb.group_by_expr(expr);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.qb = self.qb.limit(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.qb = self.qb.offset(n);
        self
    }

    /// Replace the whole statement with verbatim SQL and parameters.
    pub fn raw_query(mut self, sql: &str, params: Vec<Value>) -> Self {
        self.qb = self.qb.raw_query(sql, params);
        self
    }

    // ==================== Execution ====================

    /// Compile without executing.
    pub fn build(&self) -> (String, Vec<Value>) {
        self.qb.build()
    }

    /// The compiled SQL string (for debugging and tests).
    pub fn to_sql(&self) -> String {
        self.qb.to_sql()
    }

    /// Run the query and return raw rows, no records.
    pub fn find_rows(self) -> OrmResult<Vec<Row>> {
        let (sql, params) = self.qb.build();
        self.session.fetch(&sql, &params)
    }

    /// Run the query with LIMIT 1 and hydrate the first row, if any.
    pub fn find_one(self) -> OrmResult<Option<Record<'s>>> {
        let id_column = self.resolved_id_column();
        let Finder { session, qb, table, .. } = self;
        let (sql, params) = qb.limit(1).build();
        let rows = session.fetch(&sql, &params)?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| Record::hydrated(session, table, id_column, row)))
    }

    /// Constrain on the primary key without executing yet.
    pub fn where_id_is(self, id: impl Into<Value>) -> Self {
        let id_column = self.resolved_id_column();
        self.eq(&id_column, id)
    }

    /// Find a single row by primary key.
    pub fn find_one_by_id(self, id: impl Into<Value>) -> OrmResult<Option<Record<'s>>> {
        self.where_id_is(id).find_one()
    }

    /// Run the query and hydrate every row.
    pub fn find_many(self) -> OrmResult<Vec<Record<'s>>> {
        let id_column = self.resolved_id_column();
        let Finder { session, qb, table, .. } = self;
        let (sql, params) = qb.build();
        let rows = session.fetch(&sql, &params)?;
        Ok(rows
            .into_iter()
            .map(|row| Record::hydrated(session, table.clone(), id_column.clone(), row))
            .collect())
    }

    // ==================== Records ====================

    /// A fresh record for this table; nothing hits the database until
    /// it is saved.
    pub fn create(&self) -> Record<'s> {
        Record::fresh(self.session, self.table.clone(), self.resolved_id_column())
    }

    /// A fresh record with fields already set (and dirty).
    pub fn create_with(&self, fields: &[(&str, Value)]) -> Record<'s> {
        let mut record = self.create();
        for (field, value) in fields {
            record.set(field, value.clone());
        }
        record
    }

    // ==================== Aggregates ====================

    fn aggregate_value(self, func: &str, column: &str) -> OrmResult<Option<Value>> {
        let alias = func.to_lowercase();
        let Finder { session, qb, .. } = self;
        let column_sql = if column == "*" {
            "*".to_string()
        } else {
            quote_identifier(column, qb.quote_char())
        };
        let qb = qb
            .reset_columns()
            .select_expr_as(&format!("{}({})", func, column_sql), &alias)
            .limit(1);
        let (sql, params) = qb.build();
        let rows = session.fetch(&sql, &params)?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.get(&alias).cloned()))
    }

    fn aggregate_i64(self, func: &str, column: &str) -> OrmResult<i64> {
        Ok(self
            .aggregate_value(func, column)?
            .and_then(|value| value.as_i64())
            .unwrap_or(0))
    }

    /// `COUNT(*)` over the accumulated conditions.
    pub fn count(self) -> OrmResult<i64> {
        self.aggregate_i64("COUNT", "*")
    }

    /// `MAX(column)`; 0 when there are no rows.
    pub fn max(self, column: &str) -> OrmResult<i64> {
        self.aggregate_i64("MAX", column)
    }

    /// `MIN(column)`; 0 when there are no rows.
    pub fn min(self, column: &str) -> OrmResult<i64> {
        self.aggregate_i64("MIN", column)
    }

    /// `SUM(column)`; 0 when there are no rows.
    pub fn sum(self, column: &str) -> OrmResult<i64> {
        self.aggregate_i64("SUM", column)
    }

    /// `AVG(column)`; 0.0 when there are no rows.
    pub fn avg(self, column: &str) -> OrmResult<f64> {
        Ok(self
            .aggregate_value("AVG", column)?
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0))
    }

    // ==================== Bulk delete ====================

    /// DELETE every row matching the accumulated conditions. With no
    /// conditions this clears the table.
    pub fn delete_many(self) -> OrmResult<u64> {
        let Finder { session, qb, table, .. } = self;
        let quote = qb.quote_char();
        let delete = DeleteQb::from_conditions(&table, quote, qb.into_where_group());
        let (sql, params) = delete.build();
        session.execute(&sql, &params)
    }
}

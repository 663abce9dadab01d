//! SELECT statement builder.

use crate::ident::quote_identifier;
use crate::qb::cond::{Cond, CondGroup};
use crate::value::Value;

/// Join kind, rendered as its SQL keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Plain,
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            JoinKind::Plain => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
        }
    }
}

/// A join constraint: either a raw string passed through verbatim, or a
/// (first, operator, second) triple whose operand columns are quoted.
#[derive(Clone, Debug)]
pub enum JoinOn {
    Raw(String),
    Columns(String, String, String),
}

impl From<&str> for JoinOn {
    fn from(raw: &str) -> Self {
        JoinOn::Raw(raw.to_string())
    }
}

impl From<String> for JoinOn {
    fn from(raw: String) -> Self {
        JoinOn::Raw(raw)
    }
}

impl From<(&str, &str, &str)> for JoinOn {
    fn from((first, op, second): (&str, &str, &str)) -> Self {
        JoinOn::Columns(first.to_string(), op.to_string(), second.to_string())
    }
}

impl From<(String, String, String)> for JoinOn {
    fn from((first, op, second): (String, String, String)) -> Self {
        JoinOn::Columns(first, op, second)
    }
}

/// Fluent SELECT builder.
///
/// Accumulates result columns, joins, conditions and ordering, then
/// compiles them in fixed clause order. Compilation is pure: building
/// twice yields the same statement and parameters.
#[derive(Clone, Debug)]
pub struct SelectQb {
    table: String,
    table_alias: Option<String>,
    /// Rendered result columns; starts as the wildcard.
    columns: Vec<String>,
    /// Still on the initial `*`; the first explicit column replaces it.
    default_columns: bool,
    distinct: bool,
    /// Rendered join fragments, in insertion order.
    joins: Vec<String>,
    where_group: CondGroup,
    group_clauses: Vec<String>,
    order_clauses: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    /// Verbatim SQL override; when set, compilation ignores everything else.
    raw_override: Option<(String, Vec<Value>)>,
    quote: char,
}

impl SelectQb {
    /// Create a builder for a table, quoting identifiers with backticks.
    pub fn new(table: &str) -> Self {
        Self::with_quote(table, '`')
    }

    /// Create a builder with an explicit identifier quote character.
    pub fn with_quote(table: &str, quote: char) -> Self {
        Self {
            table: table.to_string(),
            table_alias: None,
            columns: vec!["*".to_string()],
            default_columns: true,
            distinct: false,
            joins: Vec::new(),
            where_group: CondGroup::new(),
            group_clauses: Vec::new(),
            order_clauses: Vec::new(),
            limit: None,
            offset: None,
            raw_override: None,
            quote,
        }
    }

    /// The target table name, unquoted.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The identifier quote character in use.
    pub fn quote_char(&self) -> char {
        self.quote
    }

    fn add_result_column(&mut self, rendered: String) {
        if self.default_columns {
            self.columns = vec![rendered];
            self.default_columns = false;
        } else {
            self.columns.push(rendered);
        }
    }

    /// Drop accumulated result columns, back to the bare wildcard.
    /// Aggregate finders use this to swap in their projection while
    /// keeping joins and conditions.
    pub(crate) fn reset_columns(mut self) -> Self {
        self.columns = vec!["*".to_string()];
        self.default_columns = true;
        self
    }

    /// Surrender the accumulated conditions, for reuse in a DELETE
    /// compiled from the same finder.
    pub(crate) fn into_where_group(self) -> CondGroup {
        self.where_group
    }

    // ==================== Result columns ====================

    /// Add a result column, quoted. The first explicit column replaces
    /// the initial `*`.
    pub fn select(mut self, column: &str) -> Self {
        let rendered = quote_identifier(column, self.quote);
        self.add_result_column(rendered);
        self
    }

    /// Add a result column with an alias: `` `col` AS `alias` ``.
    pub fn select_as(mut self, column: &str, alias: &str) -> Self {
        let rendered = format!(
            "{} AS {}",
            quote_identifier(column, self.quote),
            quote_identifier(alias, self.quote)
        );
        self.add_result_column(rendered);
        self
    }

    /// Add several result columns at once.
    pub fn select_many(mut self, columns: &[&str]) -> Self {
        for column in columns {
            let rendered = quote_identifier(column, self.quote);
            self.add_result_column(rendered);
        }
        self
    }

    /// Add an unquoted expression to the result columns, e.g. `COUNT(*)`.
    pub fn select_expr(mut self, expr: &str) -> Self {
        self.add_result_column(expr.to_string());
        self
    }

    /// Add an unquoted expression with an alias.
    pub fn select_expr_as(mut self, expr: &str, alias: &str) -> Self {
        let rendered = format!("{} AS {}", expr, quote_identifier(alias, self.quote));
        self.add_result_column(rendered);
        self
    }

    /// Prefix the column list with DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Alias the main table in the FROM clause.
    pub fn alias(mut self, alias: &str) -> Self {
        self.table_alias = Some(alias.to_string());
        self
    }

    // ==================== Joins ====================

    fn add_join(&mut self, kind: JoinKind, table: &str, on: JoinOn, alias: Option<&str>) {
        let mut target = quote_identifier(table, self.quote);
        if let Some(alias) = alias {
            target.push(' ');
            target.push_str(&quote_identifier(alias, self.quote));
        }
        let constraint = match on {
            JoinOn::Raw(raw) => raw,
            JoinOn::Columns(first, op, second) => format!(
                "{} {} {}",
                quote_identifier(&first, self.quote),
                op,
                quote_identifier(&second, self.quote)
            ),
        };
        self.joins
            .push(format!("{} {} ON {}", kind.keyword(), target, constraint));
    }

    /// Add a plain JOIN.
    pub fn join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.add_join(JoinKind::Plain, table, on.into(), None);
        self
    }

    /// Add an INNER JOIN.
    pub fn inner_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.add_join(JoinKind::Inner, table, on.into(), None);
        self
    }

    /// Add a LEFT OUTER JOIN.
    pub fn left_outer_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.add_join(JoinKind::LeftOuter, table, on.into(), None);
        self
    }

    /// Add a RIGHT OUTER JOIN.
    pub fn right_outer_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.add_join(JoinKind::RightOuter, table, on.into(), None);
        self
    }

    /// Add a FULL OUTER JOIN.
    pub fn full_outer_join(mut self, table: &str, on: impl Into<JoinOn>) -> Self {
        self.add_join(JoinKind::FullOuter, table, on.into(), None);
        self
    }

    /// Add a join of any kind with an alias for the joined table.
    pub fn join_as(
        mut self,
        kind: JoinKind,
        table: &str,
        on: impl Into<JoinOn>,
        alias: &str,
    ) -> Self {
        self.add_join(kind, table, on.into(), Some(alias));
        self
    }

    // ==================== WHERE conditions ====================

    /// Qualify a bare column with the table name once the query has joins.
    /// Only the comparison family does this; dotted names pass through.
    fn qualify(&self, column: &str) -> String {
        if !self.joins.is_empty() && !column.contains('.') {
            format!("{}.{}", self.table, column)
        } else {
            column.to_string()
        }
    }

    /// WHERE `column = value`
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::eq(column, value));
        self
    }

    /// WHERE `column != value`
    pub fn ne(mut self, column: &str, value: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::ne(column, value));
        self
    }

    /// WHERE `column > value`
    pub fn gt(mut self, column: &str, value: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::gt(column, value));
        self
    }

    /// WHERE `column >= value`
    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::gte(column, value));
        self
    }

    /// WHERE `column < value`
    pub fn lt(mut self, column: &str, value: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::lt(column, value));
        self
    }

    /// WHERE `column <= value`
    pub fn lte(mut self, column: &str, value: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::lte(column, value));
        self
    }

    /// WHERE `column LIKE pattern`
    pub fn like(mut self, column: &str, pattern: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::like(column, pattern));
        self
    }

    /// WHERE `column NOT LIKE pattern`
    pub fn not_like(mut self, column: &str, pattern: impl Into<Value>) -> Self {
        let column = self.qualify(column);
        self.where_group.push(Cond::not_like(column, pattern));
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

    // ==================== Ordering & grouping ====================

    /// ORDER BY `column` ASC.
    pub fn order_by_asc(mut self, column: &str) -> Self {
        let rendered = format!("{} ASC", quote_identifier(column, self.quote));
        self.order_clauses.push(rendered);
        self
    }

    /// ORDER BY `column` DESC.
    pub fn order_by_desc(mut self, column: &str) -> Self {
        let rendered = format!("{} DESC", quote_identifier(column, self.quote));
        self.order_clauses.push(rendered);
        self
    }

    /// ORDER BY an unquoted expression.
    pub fn order_by_expr(mut self, expr: &str) -> Self {
        self.order_clauses.push(expr.to_string());
        self
    }

    /// GROUP BY a quoted column.
    pub fn group_by(mut self, column: &str) -> Self {
        let rendered = quote_identifier(column, self.quote);
        self.group_clauses.push(rendered);
        self
    }

    /// GROUP BY an unquoted expression.
    pub fn group_by_expr(mut self, expr: &str) -> Self {
        self.group_clauses.push(expr.to_string());
        self
    }

    // ==================== Pagination ====================

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    // ==================== Raw override ====================

    /// Replace the whole statement with verbatim SQL and its parameters.
    /// Every accumulated fragment is ignored at build time.
    pub fn raw_query(mut self, sql: &str, params: Vec<Value>) -> Self {
        self.raw_override = Some((sql.to_string(), params));
        self
    }

    // ==================== Build ====================

    /// Compile the statement and its parameters, placeholder order
    /// matching parameter order.
    pub fn build(&self) -> (String, Vec<Value>) {
        if let Some((sql, params)) = &self.raw_override {
            return (sql.clone(), params.clone());
        }

        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.columns.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&quote_identifier(&self.table, self.quote));
        if let Some(alias) = &self.table_alias {
            sql.push(' ');
            sql.push_str(&quote_identifier(alias, self.quote));
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        let (where_sql, params) = self.where_group.build(self.quote);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !self.group_clauses.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_clauses.join(", "));
        }

        if !self.order_clauses.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_clauses.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        if let Some(offset) = self.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&offset.to_string());
        }

        (sql, params)
    }

    /// The compiled SQL string (for debugging and tests).
    pub fn to_sql(&self) -> String {
        self.build().0
    }
}

//! SQL grammars.
//!
//! A [`Grammar`] turns a [`QueryDescriptor`] into SQL text and the ordered
//! list of values bound to its placeholders. The trait's default methods
//! form the generic compiler; a dialect implements [`Grammar::name`] and
//! overrides only the pieces it spells differently (quote characters,
//! placeholders, LIMIT/OFFSET, multi-row INSERT).
//!
//! SELECT statements are compiled component by component in the order given
//! by [`Component::SELECT_ORDER`]. Components that are absent compile to an
//! empty string and are dropped; the rest are joined with single spaces.

mod generic;
mod mysql;
mod postgres;
mod sqlite;

pub use generic::GenericGrammar;
pub use mysql::MySqlGrammar;
pub use postgres::PostgresGrammar;
pub use sqlite::SqliteGrammar;

use tracing::debug;

use crate::error::{GrammarError, Result};
use crate::query::{
    Aggregate, Direction, Identifier, InsertValues, Join, JoinType, Operator, Order, Predicate,
    QueryDescriptor, Row,
};
use crate::value::{SqlValue, Value};

/// Values bound while compiling, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: Vec<SqlValue>,
}

impl Bindings {
    /// Creates an empty binding list.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Appends a value and returns its 1-based position.
    pub fn push(&mut self, value: SqlValue) -> usize {
        self.values.push(value);
        self.values.len()
    }

    /// Returns the number of bound values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the bound values.
    #[must_use]
    pub fn as_slice(&self) -> &[SqlValue] {
        &self.values
    }

    /// Consumes the list and returns the bound values.
    #[must_use]
    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}

/// The parts of a SELECT statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// `SELECT AGG(col)`, replaces [`Component::Columns`] when present.
    Aggregate,
    /// `SELECT [DISTINCT] cols`
    Columns,
    /// `FROM table`
    From,
    /// `... JOIN ... ON ...`
    Joins,
    /// `WHERE 1 = 1 ...`
    Wheres,
    /// `GROUP BY ...`
    Groups,
    /// `ORDER BY ...`
    Orders,
    /// `LIMIT n`
    Limit,
    /// `OFFSET n`
    Offset,
}

impl Component {
    /// The order in which components appear in a SELECT statement.
    pub const SELECT_ORDER: [Self; 9] = [
        Self::Aggregate,
        Self::Columns,
        Self::From,
        Self::Joins,
        Self::Wheres,
        Self::Groups,
        Self::Orders,
        Self::Limit,
        Self::Offset,
    ];
}

/// Trait for dialect-specific SQL compilation.
pub trait Grammar {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes one identifier segment, doubling embedded quote characters.
    fn quote_identifier(&self, segment: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = segment.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Returns the placeholder for the bound value at `position` (1-based).
    fn placeholder(&self, _position: usize) -> String {
        String::from("?")
    }

    /// Returns true if the dialect can express `join_type`.
    fn supports_join(&self, _join_type: JoinType) -> bool {
        true
    }

    // ------------------------------------------------------------------
    // Identifiers and parameters
    // ------------------------------------------------------------------

    /// Wraps a table or column reference in identifier quotes.
    fn wrap(&self, identifier: &Identifier) -> Result<String> {
        match identifier {
            Identifier::Expr(expr) => Ok(String::from(expr.raw())),
            Identifier::Name(name) => self.wrap_name(name),
        }
    }

    /// Wraps a name, handling `expr AS alias` and dotted segments.
    fn wrap_name(&self, name: &str) -> Result<String> {
        if name.to_ascii_lowercase().contains(" as ") {
            let segments: Vec<&str> = name.split_whitespace().collect();
            return match segments.as_slice() {
                [expr, keyword, alias] if keyword.eq_ignore_ascii_case("as") => Ok(format!(
                    "{} AS {}",
                    self.wrap_segments(expr),
                    self.wrap_segments(alias)
                )),
                _ => Err(GrammarError::MalformedAlias(String::from(name))),
            };
        }
        Ok(self.wrap_segments(name))
    }

    /// Wraps a column name in a SET or INSERT column list, where aliases
    /// have no meaning.
    fn wrap_column(&self, name: &str) -> Result<String> {
        if name.to_ascii_lowercase().contains(" as ") {
            return Err(GrammarError::AliasNotAllowed(String::from(name)));
        }
        Ok(self.wrap_segments(name))
    }

    /// Quotes each `.`-separated segment, leaving `*` bare.
    fn wrap_segments(&self, name: &str) -> String {
        name.split('.')
            .map(|segment| {
                if segment == "*" {
                    String::from(segment)
                } else {
                    self.quote_identifier(segment)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Wraps and comma-joins a list of columns.
    fn columnize(&self, columns: &[Identifier]) -> Result<String> {
        let wrapped = columns
            .iter()
            .map(|column| self.wrap(column))
            .collect::<Result<Vec<_>>>()?;
        Ok(wrapped.join(", "))
    }

    /// Emits the placeholder for a value, binding it unless it is an expression.
    fn parameter(&self, value: &Value, bindings: &mut Bindings) -> String {
        match value {
            Value::Expr(expr) => String::from(expr.raw()),
            Value::Param(value) => {
                let position = bindings.push(value.clone());
                self.placeholder(position)
            }
        }
    }

    /// Emits comma-joined placeholders for a list of values.
    fn parameterize(&self, values: &[Value], bindings: &mut Bindings) -> String {
        let mut placeholders = Vec::with_capacity(values.len());
        for value in values {
            placeholders.push(self.parameter(value, bindings));
        }
        placeholders.join(", ")
    }

    // ------------------------------------------------------------------
    // SELECT
    // ------------------------------------------------------------------

    /// Compiles a SELECT statement.
    fn compile_select(&self, query: &QueryDescriptor) -> Result<(String, Vec<SqlValue>)> {
        let mut bindings = Bindings::new();
        let mut parts = Vec::with_capacity(Component::SELECT_ORDER.len());
        for component in Component::SELECT_ORDER {
            let sql = self.compile_component(component, query, &mut bindings)?;
            if !sql.is_empty() {
                parts.push(sql);
            }
        }
        let sql = parts.join(" ");
        log_compiled(self.name(), "select", &sql, &bindings);
        Ok((sql, bindings.into_values()))
    }

    /// Compiles one SELECT component, or returns an empty string if the
    /// descriptor does not carry it.
    fn compile_component(
        &self,
        component: Component,
        query: &QueryDescriptor,
        bindings: &mut Bindings,
    ) -> Result<String> {
        match component {
            Component::Aggregate => match &query.aggregate {
                Some(aggregate) => self.compile_aggregate(query, aggregate),
                None => Ok(String::new()),
            },
            Component::Columns if query.aggregate.is_some() => Ok(String::new()),
            Component::Columns => self.compile_columns(query),
            Component::From => self.compile_from(&query.from),
            Component::Joins => self.compile_joins(&query.joins),
            Component::Wheres => self.compile_wheres(query, bindings),
            Component::Groups => self.compile_groups(&query.groups),
            Component::Orders => self.compile_orders(&query.orderings),
            Component::Limit => Ok(query
                .limit
                .map_or_else(String::new, |limit| self.compile_limit(query, limit))),
            Component::Offset => Ok(query
                .offset
                .map_or_else(String::new, |offset| self.compile_offset(query, offset))),
        }
    }

    /// Compiles `SELECT AGG(column)`.
    fn compile_aggregate(
        &self,
        _query: &QueryDescriptor,
        aggregate: &Aggregate,
    ) -> Result<String> {
        Ok(format!(
            "SELECT {}({})",
            aggregate.aggregator.to_uppercase(),
            self.wrap(&aggregate.column)?
        ))
    }

    /// Compiles `SELECT [DISTINCT] columns`.
    fn compile_columns(&self, query: &QueryDescriptor) -> Result<String> {
        let select = if query.distinct {
            "SELECT DISTINCT"
        } else {
            "SELECT"
        };
        if query.selects.is_empty() {
            return Ok(format!("{select} *"));
        }
        Ok(format!("{select} {}", self.columnize(&query.selects)?))
    }

    /// Compiles `FROM table`.
    fn compile_from(&self, table: &Identifier) -> Result<String> {
        Ok(format!("FROM {}", self.wrap(table)?))
    }

    /// Compiles the joins, space separated.
    fn compile_joins(&self, joins: &[Join]) -> Result<String> {
        let mut compiled = Vec::with_capacity(joins.len());
        for join in joins {
            compiled.push(self.compile_join(join)?);
        }
        Ok(compiled.join(" "))
    }

    /// Compiles `TYPE JOIN table ON first op second`, or `CROSS JOIN table`.
    fn compile_join(&self, join: &Join) -> Result<String> {
        let join_type = join.join_type.as_str();
        if !self.supports_join(join.join_type) {
            return Err(GrammarError::UnsupportedJoin {
                grammar: self.name(),
                join_type,
            });
        }
        let table = self.wrap(&join.table)?;
        match (join.join_type, &join.on) {
            (JoinType::Cross, None) => Ok(format!("CROSS JOIN {table}")),
            (JoinType::Cross, Some(_)) => Err(GrammarError::InvalidJoin {
                join_type,
                table,
                reason: "CROSS JOIN takes no ON condition",
            }),
            (_, None) => Err(GrammarError::InvalidJoin {
                join_type,
                table,
                reason: "missing ON condition",
            }),
            (_, Some(on)) => Ok(format!(
                "{join_type} JOIN {table} ON {} {} {}",
                self.wrap(&on.first)?,
                on.operator.as_str(),
                self.wrap(&on.second)?
            )),
        }
    }

    /// Compiles the WHERE clause, seeded with `1 = 1`.
    fn compile_wheres(&self, query: &QueryDescriptor, bindings: &mut Bindings) -> Result<String> {
        if query.wheres.is_empty() {
            return Ok(String::new());
        }
        let mut sql = String::from("WHERE 1 = 1");
        for clause in &query.wheres {
            let condition = self.compile_predicate(&clause.predicate, bindings)?;
            sql.push(' ');
            sql.push_str(clause.connector.as_str());
            sql.push(' ');
            sql.push_str(&condition);
        }
        Ok(sql)
    }

    /// Dispatches a predicate to its compiler.
    fn compile_predicate(&self, predicate: &Predicate, bindings: &mut Bindings) -> Result<String> {
        match predicate {
            Predicate::Basic {
                column,
                operator,
                value,
            } => self.where_basic(column, *operator, value, bindings),
            Predicate::In { column, values } => self.where_in(column, values, bindings),
            Predicate::NotIn { column, values } => self.where_not_in(column, values, bindings),
            Predicate::Null { column } => self.where_null(column),
            Predicate::NotNull { column } => self.where_not_null(column),
            Predicate::Between { column, low, high } => {
                self.where_between(column, low, high, false, bindings)
            }
            Predicate::NotBetween { column, low, high } => {
                self.where_between(column, low, high, true, bindings)
            }
            Predicate::Column {
                first,
                operator,
                second,
            } => self.where_column(first, *operator, second),
            Predicate::Raw { sql } => Ok(self.where_raw(sql)),
        }
    }

    /// `column op ?`
    fn where_basic(
        &self,
        column: &Identifier,
        operator: Operator,
        value: &Value,
        bindings: &mut Bindings,
    ) -> Result<String> {
        let column = self.wrap(column)?;
        Ok(format!(
            "{column} {} {}",
            operator.as_str(),
            self.parameter(value, bindings)
        ))
    }

    /// `column IN (?, ?)`; an empty list matches nothing.
    fn where_in(
        &self,
        column: &Identifier,
        values: &[Value],
        bindings: &mut Bindings,
    ) -> Result<String> {
        if values.is_empty() {
            return Ok(String::from("0 = 1"));
        }
        let column = self.wrap(column)?;
        Ok(format!("{column} IN ({})", self.parameterize(values, bindings)))
    }

    /// `column NOT IN (?, ?)`; an empty list matches everything.
    fn where_not_in(
        &self,
        column: &Identifier,
        values: &[Value],
        bindings: &mut Bindings,
    ) -> Result<String> {
        if values.is_empty() {
            return Ok(String::from("1 = 1"));
        }
        let column = self.wrap(column)?;
        Ok(format!(
            "{column} NOT IN ({})",
            self.parameterize(values, bindings)
        ))
    }

    /// `column IS NULL`
    fn where_null(&self, column: &Identifier) -> Result<String> {
        Ok(format!("{} IS NULL", self.wrap(column)?))
    }

    /// `column IS NOT NULL`
    fn where_not_null(&self, column: &Identifier) -> Result<String> {
        Ok(format!("{} IS NOT NULL", self.wrap(column)?))
    }

    /// `column [NOT] BETWEEN ? AND ?`
    fn where_between(
        &self,
        column: &Identifier,
        low: &Value,
        high: &Value,
        negated: bool,
        bindings: &mut Bindings,
    ) -> Result<String> {
        let column = self.wrap(column)?;
        let keyword = if negated { "NOT BETWEEN" } else { "BETWEEN" };
        let low = self.parameter(low, bindings);
        let high = self.parameter(high, bindings);
        Ok(format!("{column} {keyword} {low} AND {high}"))
    }

    /// `first op second`
    fn where_column(
        &self,
        first: &Identifier,
        operator: Operator,
        second: &Identifier,
    ) -> Result<String> {
        Ok(format!(
            "{} {} {}",
            self.wrap(first)?,
            operator.as_str(),
            self.wrap(second)?
        ))
    }

    /// Raw condition, emitted as written.
    fn where_raw(&self, sql: &str) -> String {
        String::from(sql)
    }

    /// Compiles `GROUP BY columns`.
    fn compile_groups(&self, groups: &[Identifier]) -> Result<String> {
        if groups.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("GROUP BY {}", self.columnize(groups)?))
    }

    /// Compiles `ORDER BY column DIR, ...`.
    fn compile_orders(&self, orders: &[Order]) -> Result<String> {
        if orders.is_empty() {
            return Ok(String::new());
        }
        let mut compiled = Vec::with_capacity(orders.len());
        for order in orders {
            compiled.push(self.compile_order(&order.column, order.direction)?);
        }
        Ok(format!("ORDER BY {}", compiled.join(", ")))
    }

    /// Compiles one ORDER BY entry.
    fn compile_order(&self, column: &Identifier, direction: Direction) -> Result<String> {
        Ok(format!("{} {}", self.wrap(column)?, direction.as_str()))
    }

    /// Compiles `LIMIT n`.
    fn compile_limit(&self, _query: &QueryDescriptor, limit: u64) -> String {
        format!("LIMIT {limit}")
    }

    /// Compiles `OFFSET n`.
    fn compile_offset(&self, _query: &QueryDescriptor, offset: u64) -> String {
        format!("OFFSET {offset}")
    }

    // ------------------------------------------------------------------
    // INSERT / UPDATE / DELETE
    // ------------------------------------------------------------------

    /// Compiles a single- or multi-row INSERT.
    ///
    /// Columns are taken from the first row. Every other row must carry the
    /// same columns, in any order; its values are bound in the first row's
    /// column order.
    fn compile_insert(
        &self,
        query: &QueryDescriptor,
        values: &InsertValues,
    ) -> Result<(String, Vec<SqlValue>)> {
        values_insert(self, query, values)
    }

    /// Compiles an UPDATE, reusing the descriptor's WHERE clause.
    fn compile_update(
        &self,
        query: &QueryDescriptor,
        values: &Row,
    ) -> Result<(String, Vec<SqlValue>)> {
        if values.is_empty() {
            return Err(GrammarError::EmptyAssignments);
        }
        let table = self.wrap(&query.from)?;

        let mut bindings = Bindings::new();
        let mut assignments = Vec::with_capacity(values.len());
        for (column, value) in values {
            let column = self.wrap_column(column)?;
            assignments.push(format!("{column} = {}", self.parameter(value, &mut bindings)));
        }
        let wheres = self.compile_wheres(query, &mut bindings)?;

        let sql = format!("UPDATE {table} SET {} {wheres}", assignments.join(", "))
            .trim_end()
            .to_owned();
        log_compiled(self.name(), "update", &sql, &bindings);
        Ok((sql, bindings.into_values()))
    }

    /// Compiles a DELETE, reusing the descriptor's WHERE clause.
    fn compile_delete(&self, query: &QueryDescriptor) -> Result<(String, Vec<SqlValue>)> {
        let table = self.wrap(&query.from)?;
        let mut bindings = Bindings::new();
        let wheres = self.compile_wheres(query, &mut bindings)?;

        let sql = format!("DELETE FROM {table} {wheres}").trim_end().to_owned();
        log_compiled(self.name(), "delete", &sql, &bindings);
        Ok((sql, bindings.into_values()))
    }
}

/// Compiles `INSERT INTO table (cols) VALUES (..), (..)`.
///
/// This is the default [`Grammar::compile_insert`]; dialects that override
/// the insert for some configurations delegate back to it for the rest.
pub fn values_insert<G: Grammar + ?Sized>(
    grammar: &G,
    query: &QueryDescriptor,
    values: &InsertValues,
) -> Result<(String, Vec<SqlValue>)> {
    let rows = values.rows();
    let first = insert_columns(rows)?;
    let table = grammar.wrap(&query.from)?;
    let columns = wrap_keys(grammar, first)?;

    let mut bindings = Bindings::new();
    let mut groups = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let mut placeholders = Vec::with_capacity(first.len());
        for value in aligned_values(first, row, index)? {
            placeholders.push(grammar.parameter(value, &mut bindings));
        }
        groups.push(format!("({})", placeholders.join(", ")));
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES {}",
        columns.join(", "),
        groups.join(", ")
    );
    log_compiled(grammar.name(), "insert", &sql, &bindings);
    Ok((sql, bindings.into_values()))
}

/// Returns the first row of an insert batch, rejecting empty batches.
pub(crate) fn insert_columns(rows: &[Row]) -> Result<&Row> {
    rows.first()
        .filter(|row| !row.is_empty())
        .ok_or(GrammarError::EmptyBatch)
}

/// Returns the values of `row` in the column order of `first`.
///
/// Fails if `row` lacks one of the columns or carries one `first` does not.
pub(crate) fn aligned_values<'r>(
    first: &Row,
    row: &'r Row,
    index: usize,
) -> Result<Vec<&'r Value>> {
    if let Some(extra) = row.keys().find(|column| !first.contains_key(*column)) {
        return Err(GrammarError::MismatchedRow {
            row: index,
            column: extra.clone(),
        });
    }
    first
        .keys()
        .map(|column| {
            row.get(column).ok_or_else(|| GrammarError::MismatchedRow {
                row: index,
                column: column.clone(),
            })
        })
        .collect()
}

/// Wraps the column names of a row.
pub(crate) fn wrap_keys<G: Grammar + ?Sized>(grammar: &G, row: &Row) -> Result<Vec<String>> {
    row.keys().map(|column| grammar.wrap_column(column)).collect()
}

pub(crate) fn log_compiled(
    grammar: &str,
    statement: &'static str,
    sql: &str,
    bindings: &Bindings,
) {
    debug!(
        grammar,
        statement,
        bindings = bindings.len(),
        %sql,
        "compiled statement"
    );
}

//! Identifier, join, ordering and row types read by the grammar.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::clause::Operator;
use crate::error::GrammarError;
use crate::value::{Expression, Value};

/// A table or column reference.
///
/// Names are quoted by the grammar (`users.id` becomes `"users"."id"`),
/// expressions are emitted as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Raw SQL, never quoted.
    Expr(Expression),
    /// A possibly dotted and possibly aliased name.
    Name(String),
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Expression> for Identifier {
    fn from(expr: Expression) -> Self {
        Self::Expr(expr)
    }
}

/// An aggregate that replaces the select list, e.g. `COUNT(*)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Aggregate function name (`COUNT`, `SUM`, ...).
    pub aggregator: String,
    /// Column the aggregate is applied to.
    pub column: Identifier,
}

/// SQL JOIN types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinType {
    /// INNER JOIN.
    #[default]
    #[serde(alias = "inner")]
    Inner,
    /// LEFT JOIN.
    #[serde(alias = "left")]
    Left,
    /// RIGHT JOIN.
    #[serde(alias = "right")]
    Right,
    /// FULL JOIN.
    #[serde(alias = "full")]
    Full,
    /// CROSS JOIN.
    #[serde(alias = "cross")]
    Cross,
}

impl JoinType {
    /// Returns the SQL keyword preceding `JOIN`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Cross => "CROSS",
        }
    }
}

/// The `ON first op second` condition of a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinCondition {
    /// Left-hand column.
    #[serde(rename = "column1")]
    pub first: Identifier,
    /// Comparison operator.
    pub operator: Operator,
    /// Right-hand column.
    #[serde(rename = "column2")]
    pub second: Identifier,
}

/// A join against another table.
///
/// Every join type except CROSS needs an ON condition; CROSS takes none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    /// Join kind.
    #[serde(rename = "type", default)]
    pub join_type: JoinType,
    /// Joined table.
    pub table: Identifier,
    /// ON condition, flattened into the join object in JSON.
    #[serde(flatten)]
    pub on: Option<JoinCondition>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword, always upper case.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(GrammarError::InvalidDirection(String::from(s)))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Sorted column.
    pub column: Identifier,
    /// Sort direction.
    #[serde(default)]
    pub direction: Direction,
}

/// A column to value mapping, in insertion order.
pub type Row = IndexMap<String, Value>;

/// Builds a [`Row`] from column/value pairs.
#[must_use]
pub fn row<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Row
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(column, value)| (column.into(), value.into()))
        .collect()
}

/// The payload of an INSERT: one row or a batch sharing the same columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsertValues {
    /// A single row.
    Single(Row),
    /// Several rows.
    Batch(Vec<Row>),
}

impl InsertValues {
    /// Returns the rows as a slice, a single row becoming a batch of one.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match self {
            Self::Single(row) => std::slice::from_ref(row),
            Self::Batch(rows) => rows,
        }
    }
}

impl From<Row> for InsertValues {
    fn from(row: Row) -> Self {
        Self::Single(row)
    }
}

impl From<Vec<Row>> for InsertValues {
    fn from(rows: Vec<Row>) -> Self {
        Self::Batch(rows)
    }
}

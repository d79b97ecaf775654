//! WHERE predicates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::Identifier;
use crate::error::GrammarError;
use crate::value::Value;

/// Boolean connector placed before a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connector {
    /// AND.
    #[default]
    #[serde(alias = "and")]
    And,
    /// OR.
    #[serde(alias = "or")]
    Or,
}

impl Connector {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Comparison operators accepted in predicates and join conditions.
///
/// Operators are emitted without escaping, so they come from this closed set
/// rather than from caller-supplied text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `=`
    #[serde(rename = "=")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    NotEq,
    /// `<>`
    #[serde(rename = "<>")]
    Ne,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    LtEq,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    GtEq,
    /// `LIKE`
    #[serde(rename = "LIKE", alias = "like")]
    Like,
    /// `NOT LIKE`
    #[serde(rename = "NOT LIKE", alias = "not like")]
    NotLike,
}

impl Operator {
    /// Returns the SQL text of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }
}

impl FromStr for Operator {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_uppercase().as_str() {
            "=" => Self::Eq,
            "!=" => Self::NotEq,
            "<>" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            "LIKE" => Self::Like,
            "NOT LIKE" => Self::NotLike,
            _ => return Err(GrammarError::UnsupportedOperator(String::from(s))),
        };
        Ok(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind tag of a predicate, as it appears in serialized descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhereKind {
    /// `where`
    Basic,
    /// `where_in`
    In,
    /// `where_not_in`
    NotIn,
    /// `where_null`
    Null,
    /// `where_not_null`
    NotNull,
    /// `where_between`
    Between,
    /// `where_not_between`
    NotBetween,
    /// `where_column`
    Column,
    /// `where_raw`
    Raw,
}

impl WhereKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Basic,
        Self::In,
        Self::NotIn,
        Self::Null,
        Self::NotNull,
        Self::Between,
        Self::NotBetween,
        Self::Column,
        Self::Raw,
    ];

    /// Returns the serialized tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "where",
            Self::In => "where_in",
            Self::NotIn => "where_not_in",
            Self::Null => "where_null",
            Self::NotNull => "where_not_null",
            Self::Between => "where_between",
            Self::NotBetween => "where_not_between",
            Self::Column => "where_column",
            Self::Raw => "where_raw",
        }
    }
}

impl FromStr for WhereKind {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GrammarError::UnsupportedClauseKind(String::from(s)))
    }
}

/// A single filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Predicate {
    /// `column op value`
    #[serde(rename = "where")]
    Basic {
        /// Compared column.
        column: Identifier,
        /// Comparison operator.
        operator: Operator,
        /// Bound value.
        value: Value,
    },
    /// `column IN (values)`
    #[serde(rename = "where_in")]
    In {
        /// Tested column.
        column: Identifier,
        /// Candidate values.
        values: Vec<Value>,
    },
    /// `column NOT IN (values)`
    #[serde(rename = "where_not_in")]
    NotIn {
        /// Tested column.
        column: Identifier,
        /// Excluded values.
        values: Vec<Value>,
    },
    /// `column IS NULL`
    #[serde(rename = "where_null")]
    Null {
        /// Tested column.
        column: Identifier,
    },
    /// `column IS NOT NULL`
    #[serde(rename = "where_not_null")]
    NotNull {
        /// Tested column.
        column: Identifier,
    },
    /// `column BETWEEN low AND high`
    #[serde(rename = "where_between")]
    Between {
        /// Tested column.
        column: Identifier,
        /// Lower bound.
        low: Value,
        /// Upper bound.
        high: Value,
    },
    /// `column NOT BETWEEN low AND high`
    #[serde(rename = "where_not_between")]
    NotBetween {
        /// Tested column.
        column: Identifier,
        /// Lower bound.
        low: Value,
        /// Upper bound.
        high: Value,
    },
    /// `first op second`, comparing two columns.
    #[serde(rename = "where_column")]
    Column {
        /// Left-hand column.
        first: Identifier,
        /// Comparison operator.
        operator: Operator,
        /// Right-hand column.
        second: Identifier,
    },
    /// Trusted SQL emitted as written.
    #[serde(rename = "where_raw")]
    Raw {
        /// Raw condition text.
        sql: String,
    },
}

impl Predicate {
    /// Returns the kind tag of this predicate.
    #[must_use]
    pub const fn kind(&self) -> WhereKind {
        match self {
            Self::Basic { .. } => WhereKind::Basic,
            Self::In { .. } => WhereKind::In,
            Self::NotIn { .. } => WhereKind::NotIn,
            Self::Null { .. } => WhereKind::Null,
            Self::NotNull { .. } => WhereKind::NotNull,
            Self::Between { .. } => WhereKind::Between,
            Self::NotBetween { .. } => WhereKind::NotBetween,
            Self::Column { .. } => WhereKind::Column,
            Self::Raw { .. } => WhereKind::Raw,
        }
    }
}

/// A predicate together with the connector that precedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Where {
    /// Connector emitted before the predicate.
    #[serde(default)]
    pub connector: Connector,
    /// The condition itself.
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Where {
    /// Creates an AND-connected predicate.
    #[must_use]
    pub const fn and(predicate: Predicate) -> Self {
        Self {
            connector: Connector::And,
            predicate,
        }
    }

    /// Creates an OR-connected predicate.
    #[must_use]
    pub const fn or(predicate: Predicate) -> Self {
        Self {
            connector: Connector::Or,
            predicate,
        }
    }
}

//! SQL values and raw expressions.
//!
//! Every [`SqlValue`] that reaches a statement is bound through a
//! placeholder. The only way to put literal text into a statement is an
//! [`Expression`], which is meant for trusted fragments written by the
//! calling code (SQL functions, computed columns), never for end-user input.

use serde::{Deserialize, Serialize};

/// A SQL value that can be bound as a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

/// A raw SQL fragment, injected verbatim.
///
/// Expressions bypass identifier quoting and parameter binding entirely.
/// In JSON they are written as `{"raw": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expression {
    raw: String,
}

impl Expression {
    /// Creates a new raw expression.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Returns the raw SQL text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Shorthand for [`Expression::new`].
#[must_use]
pub fn raw(sql: impl Into<String>) -> Expression {
    Expression::new(sql)
}

/// Anything that can occupy a value position in a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Inlined verbatim, contributes no binding.
    Expr(Expression),
    /// Bound through a placeholder.
    Param(SqlValue),
}

impl Value {
    /// Returns true if this value is a raw expression.
    #[must_use]
    pub const fn is_expression(&self) -> bool {
        matches!(self, Self::Expr(_))
    }
}

impl<T: ToSqlValue> From<T> for Value {
    fn from(value: T) -> Self {
        Self::Param(value.to_sql_value())
    }
}

impl From<Expression> for Value {
    fn from(expr: Expression) -> Self {
        Self::Expr(expr)
    }
}

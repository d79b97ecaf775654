//! # oxide-query-core
//!
//! A dialect-aware SQL grammar compiler.
//!
//! This crate provides:
//! - A passive [`QueryDescriptor`] describing a pending statement
//! - A [`Grammar`] trait compiling descriptors into SQL text plus the
//!   ordered list of bound values
//! - Dialects for ANSI SQL, PostgreSQL, MySQL and SQLite
//!
//! ## Compiling a query
//!
//! ```rust
//! use oxide_query_core::{GenericGrammar, Grammar, Operator, QueryDescriptor, SqlValue};
//!
//! let query = QueryDescriptor::new("users").where_("id", Operator::Eq, 5_i64);
//! let (sql, params) = GenericGrammar::new().compile_select(&query).unwrap();
//!
//! assert_eq!(sql, r#"SELECT * FROM "users" WHERE 1 = 1 AND "id" = ?"#);
//! assert_eq!(params, vec![SqlValue::Int(5)]);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are never written into the SQL text. Each one becomes a
//! placeholder and is returned in the parameter list, in placeholder order:
//!
//! ```rust
//! use oxide_query_core::{GenericGrammar, Grammar, Operator, QueryDescriptor, SqlValue};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let query = QueryDescriptor::new("users").where_("name", Operator::Eq, user_input);
//! let (sql, params) = GenericGrammar::new().compile_select(&query).unwrap();
//!
//! assert_eq!(sql, r#"SELECT * FROM "users" WHERE 1 = 1 AND "name" = ?"#);
//! assert_eq!(params, vec![SqlValue::Text(String::from(user_input))]);
//! ```
//!
//! Trusted SQL fragments can be inlined with [`raw`], which bypasses both
//! quoting and binding.

pub mod config;
pub mod error;
pub mod grammar;
pub mod query;
pub mod value;

pub use config::{DialectKind, GrammarConfig};
pub use error::{GrammarError, Result};
pub use grammar::{
    values_insert, Bindings, Component, GenericGrammar, Grammar, MySqlGrammar, PostgresGrammar,
    SqliteGrammar,
};
pub use query::{
    row, Aggregate, Connector, Direction, Identifier, InsertValues, Join, JoinCondition, JoinType,
    Operator, Order, Predicate, QueryDescriptor, Row, Where, WhereKind,
};
pub use value::{raw, Expression, SqlValue, ToSqlValue, Value};

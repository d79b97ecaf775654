//! Grammar selection.
//!
//! Applications pick their dialect explicitly, usually from configuration:
//!
//! ```rust
//! use oxide_query_core::{GrammarConfig, QueryDescriptor};
//!
//! let config: GrammarConfig = serde_json::from_str(r#"{"dialect": "mysql"}"#).unwrap();
//! let grammar = config.grammar();
//! let (sql, _) = grammar.compile_select(&QueryDescriptor::new("users")).unwrap();
//! assert_eq!(sql, "SELECT * FROM `users`");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;
use crate::grammar::{GenericGrammar, Grammar, MySqlGrammar, PostgresGrammar, SqliteGrammar};

/// The built-in dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// ANSI SQL.
    #[default]
    Generic,
    /// PostgreSQL.
    #[serde(alias = "postgresql")]
    Postgres,
    /// MySQL / MariaDB.
    #[serde(alias = "mariadb")]
    MySql,
    /// SQLite.
    Sqlite,
}

impl DialectKind {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}

impl FromStr for DialectKind {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(Self::Generic),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(GrammarError::UnknownDialect(String::from(s))),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Dialect to compile for.
    #[serde(default)]
    pub dialect: DialectKind,
    /// Compile SQLite batch inserts as compound selects.
    #[serde(default)]
    pub compound_insert: bool,
}

impl GrammarConfig {
    /// Creates a configuration for `dialect`.
    #[must_use]
    pub const fn new(dialect: DialectKind) -> Self {
        Self {
            dialect,
            compound_insert: false,
        }
    }

    /// Builds the configured grammar.
    #[must_use]
    pub fn grammar(&self) -> Box<dyn Grammar + Send + Sync> {
        match self.dialect {
            DialectKind::Generic => Box::new(GenericGrammar::new()),
            DialectKind::Postgres => Box::new(PostgresGrammar::new()),
            DialectKind::MySql => Box::new(MySqlGrammar::new()),
            DialectKind::Sqlite => {
                Box::new(SqliteGrammar::new().with_compound_insert(self.compound_insert))
            }
        }
    }
}

impl From<DialectKind> for GrammarConfig {
    fn from(dialect: DialectKind) -> Self {
        Self::new(dialect)
    }
}

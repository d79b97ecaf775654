//! PostgreSQL grammar.

use super::Grammar;

/// PostgreSQL grammar: numbered `$n` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresGrammar;

impl PostgresGrammar {
    /// Creates a new PostgreSQL grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Grammar for PostgresGrammar {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn placeholder(&self, position: usize) -> String {
        format!("${position}")
    }
}

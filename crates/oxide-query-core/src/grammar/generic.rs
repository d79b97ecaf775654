//! Generic SQL grammar.

use super::Grammar;

/// A generic grammar using ANSI SQL conventions: double-quoted identifiers,
/// `?` placeholders and `LIMIT`/`OFFSET`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericGrammar;

impl GenericGrammar {
    /// Creates a new generic grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Grammar for GenericGrammar {
    fn name(&self) -> &'static str {
        "generic"
    }
}

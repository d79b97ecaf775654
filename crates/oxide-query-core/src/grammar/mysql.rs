//! MySQL grammar.

use super::Grammar;
use crate::query::{JoinType, QueryDescriptor};

/// MySQL grammar: backtick-quoted identifiers.
///
/// MySQL has no OFFSET without LIMIT, so an offset-only query is given the
/// largest possible limit. It also has no FULL JOIN; it would read `FULL`
/// as a table alias, so such joins are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlGrammar;

impl MySqlGrammar {
    /// Creates a new MySQL grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Grammar for MySqlGrammar {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn supports_join(&self, join_type: JoinType) -> bool {
        join_type != JoinType::Full
    }

    fn compile_offset(&self, query: &QueryDescriptor, offset: u64) -> String {
        if query.limit.is_some() {
            format!("OFFSET {offset}")
        } else {
            format!("LIMIT {} OFFSET {offset}", u64::MAX)
        }
    }
}

//! SQLite grammar.

use super::{
    aligned_values, insert_columns, log_compiled, values_insert, wrap_keys, Bindings, Grammar,
};
use crate::error::Result;
use crate::query::{InsertValues, QueryDescriptor};
use crate::value::SqlValue;

/// SQLite grammar.
///
/// SQLite needs a LIMIT before OFFSET; `LIMIT -1` means no limit. Engines
/// older than SQLite 3.7.11 have no multi-row `VALUES`, for those enable
/// [`SqliteGrammar::compound_insert`] to compile batches as
/// `SELECT ... UNION ALL SELECT ...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteGrammar {
    compound_insert: bool,
}

impl SqliteGrammar {
    /// Creates a new SQLite grammar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compound_insert: false,
        }
    }

    /// Creates a grammar that compiles batch inserts as compound selects.
    #[must_use]
    pub const fn compound_insert() -> Self {
        Self {
            compound_insert: true,
        }
    }

    /// Sets whether batch inserts use compound selects.
    #[must_use]
    pub const fn with_compound_insert(mut self, enabled: bool) -> Self {
        self.compound_insert = enabled;
        self
    }

    /// Returns true if batch inserts use compound selects.
    #[must_use]
    pub const fn uses_compound_insert(&self) -> bool {
        self.compound_insert
    }
}

impl Grammar for SqliteGrammar {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn compile_offset(&self, query: &QueryDescriptor, offset: u64) -> String {
        if query.limit.is_some() {
            format!("OFFSET {offset}")
        } else {
            format!("LIMIT -1 OFFSET {offset}")
        }
    }

    fn compile_insert(
        &self,
        query: &QueryDescriptor,
        values: &InsertValues,
    ) -> Result<(String, Vec<SqlValue>)> {
        let rows = values.rows();
        if !self.compound_insert || rows.len() < 2 {
            return values_insert(self, query, values);
        }

        let first = insert_columns(rows)?;
        let table = self.wrap(&query.from)?;
        let columns = wrap_keys(self, first)?;

        let mut bindings = Bindings::new();
        let mut selects = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let mut items = Vec::with_capacity(columns.len());
            let values = aligned_values(first, row, index)?;
            for (value, column) in values.into_iter().zip(&columns) {
                let placeholder = self.parameter(value, &mut bindings);
                // Only the first SELECT names the result columns.
                if index == 0 {
                    items.push(format!("{placeholder} AS {column}"));
                } else {
                    items.push(placeholder);
                }
            }
            selects.push(format!("SELECT {}", items.join(", ")));
        }

        let sql = format!(
            "INSERT INTO {table} ({}) {}",
            columns.join(", "),
            selects.join(" UNION ALL ")
        );
        log_compiled(self.name(), "insert", &sql, &bindings);
        Ok((sql, bindings.into_values()))
    }
}

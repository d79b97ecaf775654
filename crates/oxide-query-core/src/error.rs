//! Error types for statement compilation.

/// Errors that can occur while compiling a query descriptor.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// A WHERE predicate carries a type tag with no matching compiler.
    #[error("unsupported where clause kind: '{0}'")]
    UnsupportedClauseKind(String),

    /// An operator outside the supported comparison set.
    #[error("unsupported operator: '{0}'")]
    UnsupportedOperator(String),

    /// An ordering direction other than ASC or DESC.
    #[error("invalid order direction: '{0}'")]
    InvalidDirection(String),

    /// A dialect name that no grammar answers to.
    #[error("unknown dialect: '{0}'")]
    UnknownDialect(String),

    /// An aliased identifier that is not of the form `expr AS alias`.
    #[error("malformed alias in identifier '{0}', expected `expr AS alias`")]
    MalformedAlias(String),

    /// A column position (SET or INSERT list) given an aliased name.
    #[error("alias not allowed in column '{0}'")]
    AliasNotAllowed(String),

    /// A join whose type and ON condition do not fit together.
    #[error("invalid {join_type} JOIN on {table}: {reason}")]
    InvalidJoin {
        /// Join keyword.
        join_type: &'static str,
        /// Wrapped table name.
        table: String,
        /// What is wrong with the condition.
        reason: &'static str,
    },

    /// A join type the dialect cannot express.
    #[error("{grammar} does not support {join_type} JOIN")]
    UnsupportedJoin {
        /// Grammar name.
        grammar: &'static str,
        /// Join keyword.
        join_type: &'static str,
    },

    /// INSERT was given no rows, or a first row without columns.
    #[error("cannot compile an insert without rows")]
    EmptyBatch,

    /// An INSERT row whose columns differ from the first row's.
    #[error("insert row {row} does not match the first row's columns at '{column}'")]
    MismatchedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Missing or unexpected column.
        column: String,
    },

    /// UPDATE was given no column assignments.
    #[error("cannot compile an update without assignments")]
    EmptyAssignments,

    /// A JSON descriptor could not be decoded.
    #[error("invalid query descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, GrammarError>;

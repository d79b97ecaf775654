//! The query descriptor: a passive description of a pending statement.
//!
//! A [`QueryDescriptor`] is assembled by whatever builds queries (a fluent
//! API, a JSON payload, a test) and handed to a
//! [`Grammar`](crate::grammar::Grammar) for compilation. The grammar only
//! reads it.
//!
//! ```rust
//! use oxide_query_core::{Direction, GenericGrammar, Grammar, Operator, QueryDescriptor};
//!
//! let query = QueryDescriptor::new("users")
//!     .select(["id", "name"])
//!     .where_("active", Operator::Eq, true)
//!     .order_by("name", Direction::Asc)
//!     .limit(10);
//!
//! let (sql, params) = GenericGrammar::new().compile_select(&query).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT "id", "name" FROM "users" WHERE 1 = 1 AND "active" = ? ORDER BY "name" ASC LIMIT 10"#
//! );
//! assert_eq!(params.len(), 1);
//! ```

mod clause;
mod types;

pub use clause::{Connector, Operator, Predicate, Where, WhereKind};
pub use types::{
    row, Aggregate, Direction, Identifier, InsertValues, Join, JoinCondition, JoinType, Order,
    Row,
};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

/// The shape of a pending statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// Target table.
    pub from: Identifier,
    /// Projected columns; empty selects `*`.
    #[serde(default)]
    pub selects: Vec<Identifier>,
    /// SELECT DISTINCT.
    #[serde(default)]
    pub distinct: bool,
    /// Aggregate replacing the select list.
    #[serde(default)]
    pub aggregate: Option<Aggregate>,
    /// Joined tables, in order.
    #[serde(default)]
    pub joins: Vec<Join>,
    /// Filter predicates, in order.
    #[serde(default)]
    pub wheres: Vec<Where>,
    /// GROUP BY columns.
    #[serde(default)]
    pub groups: Vec<Identifier>,
    /// ORDER BY entries.
    #[serde(default)]
    pub orderings: Vec<Order>,
    /// Row limit.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Row offset.
    #[serde(default)]
    pub offset: Option<u64>,
}

impl QueryDescriptor {
    /// Creates an empty descriptor targeting `table`.
    #[must_use]
    pub fn new(table: impl Into<Identifier>) -> Self {
        Self {
            from: table.into(),
            selects: vec![],
            distinct: false,
            aggregate: None,
            joins: vec![],
            wheres: vec![],
            groups: vec![],
            orderings: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Decodes a descriptor from JSON.
    ///
    /// Predicate `type` tags are checked before decoding, so an unknown tag
    /// fails with
    /// [`GrammarError::UnsupportedClauseKind`](crate::GrammarError::UnsupportedClauseKind).
    pub fn from_json(json: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        if let Some(wheres) = document.get("wheres").and_then(serde_json::Value::as_array) {
            for tag in wheres
                .iter()
                .filter_map(|w| w.get("type").and_then(serde_json::Value::as_str))
            {
                tag.parse::<WhereKind>()?;
            }
        }
        Ok(serde_json::from_value(document)?)
    }

    /// Sets the projected columns.
    #[must_use]
    pub fn select<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Identifier>,
    {
        self.selects = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Replaces the select list with an aggregate.
    #[must_use]
    pub fn aggregate(mut self, aggregator: &str, column: impl Into<Identifier>) -> Self {
        self.aggregate = Some(Aggregate {
            aggregator: String::from(aggregator),
            column: column.into(),
        });
        self
    }

    /// Shorthand for `aggregate("COUNT", "*")`.
    #[must_use]
    pub fn count(self) -> Self {
        self.aggregate("COUNT", "*")
    }

    /// Adds a join of the given type with an ON condition.
    #[must_use]
    pub fn join_with(
        mut self,
        join_type: JoinType,
        table: impl Into<Identifier>,
        first: impl Into<Identifier>,
        operator: Operator,
        second: impl Into<Identifier>,
    ) -> Self {
        self.joins.push(Join {
            join_type,
            table: table.into(),
            on: Some(JoinCondition {
                first: first.into(),
                operator,
                second: second.into(),
            }),
        });
        self
    }

    /// Adds a CROSS JOIN, which takes no ON condition.
    #[must_use]
    pub fn cross_join(mut self, table: impl Into<Identifier>) -> Self {
        self.joins.push(Join {
            join_type: JoinType::Cross,
            table: table.into(),
            on: None,
        });
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn join(
        self,
        table: impl Into<Identifier>,
        first: impl Into<Identifier>,
        operator: Operator,
        second: impl Into<Identifier>,
    ) -> Self {
        self.join_with(JoinType::Inner, table, first, operator, second)
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(
        self,
        table: impl Into<Identifier>,
        first: impl Into<Identifier>,
        operator: Operator,
        second: impl Into<Identifier>,
    ) -> Self {
        self.join_with(JoinType::Left, table, first, operator, second)
    }

    /// Adds a RIGHT JOIN.
    #[must_use]
    pub fn right_join(
        self,
        table: impl Into<Identifier>,
        first: impl Into<Identifier>,
        operator: Operator,
        second: impl Into<Identifier>,
    ) -> Self {
        self.join_with(JoinType::Right, table, first, operator, second)
    }

    /// Appends a predicate with its connector.
    #[must_use]
    pub fn push_where(mut self, clause: Where) -> Self {
        self.wheres.push(clause);
        self
    }

    /// Adds `column op value`, AND-connected.
    #[must_use]
    pub fn where_(
        self,
        column: impl Into<Identifier>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        self.push_where(Where::and(Predicate::Basic {
            column: column.into(),
            operator,
            value: value.into(),
        }))
    }

    /// Adds `column op value`, OR-connected.
    #[must_use]
    pub fn or_where(
        self,
        column: impl Into<Identifier>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        self.push_where(Where::or(Predicate::Basic {
            column: column.into(),
            operator,
            value: value.into(),
        }))
    }

    /// Adds `column IN (...)`.
    #[must_use]
    pub fn where_in<I, V>(self, column: impl Into<Identifier>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_where(Where::and(Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    /// Adds `column NOT IN (...)`.
    #[must_use]
    pub fn where_not_in<I, V>(self, column: impl Into<Identifier>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_where(Where::and(Predicate::NotIn {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    /// Adds `column IS NULL`.
    #[must_use]
    pub fn where_null(self, column: impl Into<Identifier>) -> Self {
        self.push_where(Where::and(Predicate::Null {
            column: column.into(),
        }))
    }

    /// Adds `column IS NOT NULL`.
    #[must_use]
    pub fn where_not_null(self, column: impl Into<Identifier>) -> Self {
        self.push_where(Where::and(Predicate::NotNull {
            column: column.into(),
        }))
    }

    /// Adds `column BETWEEN low AND high`.
    #[must_use]
    pub fn where_between(
        self,
        column: impl Into<Identifier>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.push_where(Where::and(Predicate::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        }))
    }

    /// Adds `column NOT BETWEEN low AND high`.
    #[must_use]
    pub fn where_not_between(
        self,
        column: impl Into<Identifier>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.push_where(Where::and(Predicate::NotBetween {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        }))
    }

    /// Adds a comparison between two columns.
    #[must_use]
    pub fn where_column(
        self,
        first: impl Into<Identifier>,
        operator: Operator,
        second: impl Into<Identifier>,
    ) -> Self {
        self.push_where(Where::and(Predicate::Column {
            first: first.into(),
            operator,
            second: second.into(),
        }))
    }

    /// Adds a raw, AND-connected condition.
    #[must_use]
    pub fn where_raw(self, sql: impl Into<String>) -> Self {
        self.push_where(Where::and(Predicate::Raw { sql: sql.into() }))
    }

    /// Adds a raw, OR-connected condition.
    #[must_use]
    pub fn or_where_raw(self, sql: impl Into<String>) -> Self {
        self.push_where(Where::or(Predicate::Raw { sql: sql.into() }))
    }

    /// Sets the GROUP BY columns.
    #[must_use]
    pub fn group_by<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Identifier>,
    {
        self.groups = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Appends an ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<Identifier>, direction: Direction) -> Self {
        self.orderings.push(Order {
            column: column.into(),
            direction,
        });
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

#![allow(dead_code)]

use oxide_query_core::{GenericGrammar, Grammar, InsertValues, QueryDescriptor, Row, SqlValue};

pub fn select(query: &QueryDescriptor) -> (String, Vec<SqlValue>) {
    GenericGrammar::new()
        .compile_select(query)
        .unwrap_or_else(|e| panic!("Failed to compile select: {e}\nQuery: {query:?}"))
}

pub fn select_sql(query: &QueryDescriptor) -> String {
    select(query).0
}

pub fn insert(
    query: &QueryDescriptor,
    values: impl Into<InsertValues>,
) -> (String, Vec<SqlValue>) {
    let values = values.into();
    GenericGrammar::new()
        .compile_insert(query, &values)
        .unwrap_or_else(|e| panic!("Failed to compile insert: {e}\nValues: {values:?}"))
}

pub fn update(query: &QueryDescriptor, values: &Row) -> (String, Vec<SqlValue>) {
    GenericGrammar::new()
        .compile_update(query, values)
        .unwrap_or_else(|e| panic!("Failed to compile update: {e}\nQuery: {query:?}"))
}

pub fn delete(query: &QueryDescriptor) -> (String, Vec<SqlValue>) {
    GenericGrammar::new()
        .compile_delete(query)
        .unwrap_or_else(|e| panic!("Failed to compile delete: {e}\nQuery: {query:?}"))
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

/// Asserts that no bound value leaks into the SQL text.
pub fn assert_parameterized(sql: &str, params: &[SqlValue]) {
    for param in params {
        if let SqlValue::Text(s) = param {
            assert!(
                !sql.contains(s.as_str()),
                "Bound value {s:?} appears in SQL: {sql}"
            );
        }
    }
}

//! Tests for WHERE predicate compilation.

mod common;
use common::*;

use oxide_query_core::{
    raw, Connector, Identifier, Operator, Predicate, QueryDescriptor, SqlValue, Value, Where,
};

fn users() -> QueryDescriptor {
    QueryDescriptor::new("users")
}

// ===================================================================
// Seed and connectors
// ===================================================================

#[test]
fn where_seed_is_always_first() {
    let query = users().or_where("id", Operator::Eq, 1_i64);
    assert_eq!(
        select_sql(&query),
        r#"SELECT * FROM "users" WHERE 1 = 1 OR "id" = ?"#
    );
}

#[test]
fn connectors_precede_each_predicate() {
    let query = users()
        .where_("a", Operator::Eq, 1_i64)
        .or_where("b", Operator::Eq, 2_i64)
        .where_("c", Operator::Eq, 3_i64);
    let (sql, params) = select(&query);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE 1 = 1 AND "a" = ? OR "b" = ? AND "c" = ?"#
    );
    assert_eq!(
        params,
        vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]
    );
}

#[test]
fn push_where_with_explicit_connector() {
    let query = users().push_where(Where {
        connector: Connector::Or,
        predicate: Predicate::Null {
            column: Identifier::from("deleted_at"),
        },
    });
    assert_eq!(
        select_sql(&query),
        r#"SELECT * FROM "users" WHERE 1 = 1 OR "deleted_at" IS NULL"#
    );
}

// ===================================================================
// Basic comparisons
// ===================================================================

#[test]
fn comparison_operators() {
    for (op, text) in [
        (Operator::Eq, "="),
        (Operator::NotEq, "!="),
        (Operator::Ne, "<>"),
        (Operator::Lt, "<"),
        (Operator::LtEq, "<="),
        (Operator::Gt, ">"),
        (Operator::GtEq, ">="),
        (Operator::Like, "LIKE"),
        (Operator::NotLike, "NOT LIKE"),
    ] {
        let sql = select_sql(&users().where_("age", op, 30_i64));
        assert_eq!(
            sql,
            format!(r#"SELECT * FROM "users" WHERE 1 = 1 AND "age" {text} ?"#)
        );
    }
}

#[test]
fn expression_value_is_inlined_without_binding() {
    let query = users().where_("created_at", Operator::Lt, raw("CURRENT_TIMESTAMP"));
    let (sql, params) = select(&query);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE 1 = 1 AND "created_at" < CURRENT_TIMESTAMP"#
    );
    assert!(params.is_empty());
}

#[test]
fn null_value_is_still_bound() {
    let query = users().where_("manager_id", Operator::Eq, None::<i64>);
    let (sql, params) = select(&query);
    assert_eq!(sql, r#"SELECT * FROM "users" WHERE 1 = 1 AND "manager_id" = ?"#);
    assert_eq!(params, vec![SqlValue::Null]);
}

// ===================================================================
// IN / NOT IN
// ===================================================================

#[test]
fn where_in_list() {
    let (sql, params) = select(&users().where_in("status", ["active", "pending"]));
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE 1 = 1 AND "status" IN (?, ?)"#
    );
    assert_eq!(params, vec![text("active"), text("pending")]);
}

#[test]
fn where_not_in_list() {
    let (sql, params) = select(&users().where_not_in("id", [4_i64, 5]));
    assert_eq!(sql, r#"SELECT * FROM "users" WHERE 1 = 1 AND "id" NOT IN (?, ?)"#);
    assert_eq!(params, vec![SqlValue::Int(4), SqlValue::Int(5)]);
}

#[test]
fn where_in_mixes_expressions_and_values() {
    let values = vec![Value::from(1_i64), Value::from(raw("(SELECT 2)"))];
    let (sql, params) = select(&users().where_in("id", values));
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE 1 = 1 AND "id" IN (?, (SELECT 2))"#
    );
    assert_eq!(params, vec![SqlValue::Int(1)]);
}

#[test]
fn empty_in_lists() {
    let empty: [i64; 0] = [];
    assert_eq!(
        select_sql(&users().where_in("id", empty)),
        r#"SELECT * FROM "users" WHERE 1 = 1 AND 0 = 1"#
    );
    assert_eq!(
        select_sql(&users().where_not_in("id", empty)),
        r#"SELECT * FROM "users" WHERE 1 = 1 AND 1 = 1"#
    );
}

// ===================================================================
// NULL checks, BETWEEN, column comparisons, raw
// ===================================================================

#[test]
fn null_checks() {
    let query = users().where_null("deleted_at").where_not_null("users.email");
    let (sql, params) = select(&query);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE 1 = 1 AND "deleted_at" IS NULL AND "users"."email" IS NOT NULL"#
    );
    assert!(params.is_empty());
}

#[test]
fn between_and_not_between() {
    let query = users()
        .where_between("age", 18_i64, 65_i64)
        .push_where(Where::or(Predicate::NotBetween {
            column: Identifier::from("score"),
            low: Value::from(0_i64),
            high: Value::from(10_i64),
        }));
    let (sql, params) = select(&query);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE 1 = 1 AND "age" BETWEEN ? AND ? OR "score" NOT BETWEEN ? AND ?"#
    );
    assert_eq!(
        params,
        vec![
            SqlValue::Int(18),
            SqlValue::Int(65),
            SqlValue::Int(0),
            SqlValue::Int(10)
        ]
    );
}

#[test]
fn column_comparison_binds_nothing() {
    let query = users().where_column("updated_at", Operator::Gt, "created_at");
    let (sql, params) = select(&query);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE 1 = 1 AND "updated_at" > "created_at""#
    );
    assert!(params.is_empty());
}

#[test]
fn raw_conditions_pass_through() {
    let query = users()
        .where_raw("age > 18 AND age < 65")
        .or_where_raw("is_admin");
    assert_eq!(
        select_sql(&query),
        r#"SELECT * FROM "users" WHERE 1 = 1 AND age > 18 AND age < 65 OR is_admin"#
    );
}

#[test]
fn bindings_follow_emission_order() {
    let query = users()
        .where_in("role", ["admin", "staff"])
        .where_("name", Operator::Like, "A%")
        .where_between("age", 20_i64, 30_i64)
        .where_("active", Operator::Eq, true);
    let (_, params) = select(&query);
    assert_eq!(
        params,
        vec![
            text("admin"),
            text("staff"),
            text("A%"),
            SqlValue::Int(20),
            SqlValue::Int(30),
            SqlValue::Bool(true),
        ]
    );
}

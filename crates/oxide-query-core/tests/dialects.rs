//! Tests for dialect overrides and grammar selection.

use oxide_query_core::{
    row, DialectKind, Direction, GenericGrammar, Grammar, GrammarConfig, GrammarError,
    InsertValues, JoinType, MySqlGrammar, Operator, PostgresGrammar, QueryDescriptor,
    SqliteGrammar,
};

fn paged() -> QueryDescriptor {
    QueryDescriptor::new("posts")
        .where_("published", Operator::Eq, true)
        .order_by("id", Direction::Desc)
        .offset(40)
}

#[test]
fn offset_only_per_dialect() {
    let generic = GenericGrammar::new();
    let postgres = PostgresGrammar::new();
    let mysql = MySqlGrammar::new();
    let sqlite = SqliteGrammar::new();
    let cases: [(&dyn Grammar, &str); 4] = [
        (
            &generic,
            r#"SELECT * FROM "posts" WHERE 1 = 1 AND "published" = ? ORDER BY "id" DESC OFFSET 40"#,
        ),
        (
            &postgres,
            r#"SELECT * FROM "posts" WHERE 1 = 1 AND "published" = $1 ORDER BY "id" DESC OFFSET 40"#,
        ),
        (
            &mysql,
            "SELECT * FROM `posts` WHERE 1 = 1 AND `published` = ? ORDER BY `id` DESC LIMIT 18446744073709551615 OFFSET 40",
        ),
        (
            &sqlite,
            r#"SELECT * FROM "posts" WHERE 1 = 1 AND "published" = ? ORDER BY "id" DESC LIMIT -1 OFFSET 40"#,
        ),
    ];
    for (grammar, expected) in cases {
        let (sql, params) = grammar.compile_select(&paged()).unwrap();
        assert_eq!(sql, expected, "dialect {}", grammar.name());
        assert_eq!(params.len(), 1);
    }
}

#[test]
fn dialects_share_the_pipeline() {
    let query = QueryDescriptor::new("users").limit(2).offset(4);
    let sql = |g: &dyn Grammar| g.compile_select(&query).unwrap().0;
    assert_eq!(sql(&GenericGrammar::new()), r#"SELECT * FROM "users" LIMIT 2 OFFSET 4"#);
    assert_eq!(sql(&SqliteGrammar::new()), r#"SELECT * FROM "users" LIMIT 2 OFFSET 4"#);
    assert_eq!(sql(&MySqlGrammar::new()), "SELECT * FROM `users` LIMIT 2 OFFSET 4");
}

#[test]
fn cross_join_has_no_on_clause() {
    let query = QueryDescriptor::new("a").cross_join("b");
    let postgres = PostgresGrammar::new();
    let mysql = MySqlGrammar::new();
    let sqlite = SqliteGrammar::new();
    let cases: [(&dyn Grammar, &str); 3] = [
        (&postgres, r#"SELECT * FROM "a" CROSS JOIN "b""#),
        (&mysql, "SELECT * FROM `a` CROSS JOIN `b`"),
        (&sqlite, r#"SELECT * FROM "a" CROSS JOIN "b""#),
    ];
    for (grammar, expected) in cases {
        let (sql, params) = grammar.compile_select(&query).unwrap();
        assert_eq!(sql, expected, "dialect {}", grammar.name());
        assert!(params.is_empty());
    }
}

#[test]
fn full_join_per_dialect() {
    let query =
        QueryDescriptor::new("a").join_with(JoinType::Full, "b", "a.id", Operator::Eq, "b.a_id");
    let (sql, _) = PostgresGrammar::new().compile_select(&query).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "a" FULL JOIN "b" ON "a"."id" = "b"."a_id""#);

    let err = MySqlGrammar::new().compile_select(&query).unwrap_err();
    assert!(matches!(
        err,
        GrammarError::UnsupportedJoin { grammar: "mysql", join_type: "FULL" }
    ));
}

#[test]
fn cross_join_with_condition_is_rejected() {
    let query =
        QueryDescriptor::new("a").join_with(JoinType::Cross, "b", "a.id", Operator::Eq, "b.a_id");
    for grammar in [
        GrammarConfig::new(DialectKind::Generic).grammar(),
        GrammarConfig::new(DialectKind::Postgres).grammar(),
        GrammarConfig::new(DialectKind::MySql).grammar(),
        GrammarConfig::new(DialectKind::Sqlite).grammar(),
    ] {
        assert!(matches!(
            grammar.compile_select(&query),
            Err(GrammarError::InvalidJoin { join_type: "CROSS", .. })
        ));
    }
}

#[test]
fn postgres_insert_numbering() {
    let rows = InsertValues::Batch(vec![
        row([("a", 1_i64), ("b", 2_i64)]),
        row([("a", 3_i64), ("b", 4_i64)]),
    ]);
    let (sql, _) = PostgresGrammar::new()
        .compile_insert(&QueryDescriptor::new("t"), &rows)
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "t" ("a", "b") VALUES ($1, $2), ($3, $4)"#);
}

#[test]
fn configured_grammar_compiles() {
    let config: GrammarConfig =
        serde_json::from_str(r#"{"dialect": "sqlite", "compound_insert": true}"#).unwrap();
    assert_eq!(config.dialect, DialectKind::Sqlite);
    let grammar = config.grammar();
    let rows = InsertValues::Batch(vec![row([("a", 1_i64)]), row([("a", 2_i64)])]);
    let (sql, params) = grammar
        .compile_insert(&QueryDescriptor::new("t"), &rows)
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "t" ("a") SELECT ? AS "a" UNION ALL SELECT ?"#);
    assert_eq!(params.len(), 2);
}

#[test]
fn grammars_are_usable_across_threads() {
    let grammar = GrammarConfig::new(DialectKind::Postgres).grammar();
    let query = QueryDescriptor::new("users").where_("id", Operator::Eq, 1_i64);
    let expected = grammar.compile_select(&query).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| grammar.compile_select(&query).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

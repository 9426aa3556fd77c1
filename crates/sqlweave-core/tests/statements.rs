//! Whole statements: subqueries, dialects, configuration and post-processing.

mod common;

use common::{literal, literal_with, parameterized, parameterized_with};
use sqlweave_core::{
    col, exists, not_exists, raw, BuildError, Comparison, Delete, Dialect, IdentifierCase, Insert,
    NamePolicy, PostProcessor, Query, QuotePolicy, RenderOptions, Rendered, Select, SqlValue,
    Update, With,
};

fn big_spenders() -> Query {
    Select::new()
        .columns(&["user_id"])
        .from("orders")
        .where_clause(col("total").gt(100))
        .build()
}

#[test]
fn test_in_subquery() {
    let query = Select::new()
        .columns(&["name"])
        .from("users")
        .where_clause(col("id").in_query(big_spenders()))
        .build();

    assert_eq!(
        literal(&query),
        "SELECT NAME FROM USERS WHERE ID IN (SELECT USER_ID FROM ORDERS WHERE TOTAL > 100)"
    );
}

#[test]
fn test_quantified_subqueries() {
    let prices = Select::new().columns(&["price"]).from("items").build();
    let query = Select::new()
        .from("items")
        .where_clause(col("price").all(Comparison::Ge, prices.clone()))
        .or(col("price").any(Comparison::Lt, prices))
        .build();

    assert_eq!(
        literal(&query),
        "SELECT * FROM ITEMS WHERE PRICE >= ALL (SELECT PRICE FROM ITEMS) OR PRICE < ANY (SELECT PRICE FROM ITEMS)"
    );
}

#[test]
fn test_exists_and_not_exists() {
    let orders = Select::new()
        .from("orders o")
        .where_clause(col("o.user_id").eq_column("u.id"))
        .build();
    let query = Select::new()
        .from("users u")
        .where_clause(exists(orders.clone()))
        .and(not_exists(orders))
        .build();

    assert_eq!(
        literal(&query),
        "SELECT * FROM USERS AS u WHERE EXISTS (SELECT * FROM ORDERS AS o WHERE O.USER_ID = U.ID) \
         AND NOT EXISTS (SELECT * FROM ORDERS AS o WHERE O.USER_ID = U.ID)"
    );
}

#[test]
fn test_subquery_values_keep_left_to_right_order() {
    let query = Select::new()
        .from("users")
        .where_clause(col("age").gt(18))
        .and(col("id").in_query(big_spenders()))
        .and(col("name").like("A%"))
        .build();

    let (sql, params) = parameterized(&query);
    assert_eq!(
        sql,
        "SELECT * FROM USERS WHERE AGE > ? AND ID IN (SELECT USER_ID FROM ORDERS WHERE TOTAL > ?) AND NAME LIKE ?"
    );
    assert_eq!(
        params,
        vec![
            SqlValue::Int(18),
            SqlValue::Int(100),
            SqlValue::Text(String::from("A%"))
        ]
    );
}

#[test]
fn test_numbered_placeholders_run_through_subqueries() {
    let query = Select::new()
        .from("users")
        .where_clause(col("age").gt(18))
        .and(col("id").in_query(big_spenders()))
        .and(col("name").like("A%"))
        .build();

    let options = RenderOptions::new().dialect(Dialect::Postgres);
    let (sql, params) = parameterized_with(&query, &options);
    assert_eq!(
        sql,
        "SELECT * FROM USERS WHERE AGE > $1 AND ID IN (SELECT USER_ID FROM ORDERS WHERE TOTAL > $2) AND NAME LIKE $3"
    );
    assert_eq!(params.len(), 3);
}

#[test]
fn test_shared_prefix_renders_independently() {
    let base = Select::new().columns(&["id"]).from("users");
    let active = base.clone().where_clause(col("active").eq(true)).build();
    let everyone = base.order_by(&["id"]).build();

    assert_eq!(literal(&active), "SELECT ID FROM USERS WHERE ACTIVE = true");
    assert_eq!(literal(&everyone), "SELECT ID FROM USERS ORDER BY ID");

    let (_, first) = parameterized(&active);
    let (_, second) = parameterized(&active);
    assert_eq!(first, second);
}

#[test]
fn test_queries_render_from_several_threads() {
    let query = Select::new()
        .from("t")
        .where_clause(col("a").eq(1))
        .build();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let query = query.clone();
            std::thread::spawn(move || query.to_parameterized(&RenderOptions::default()))
        })
        .collect();
    for handle in handles {
        let (sql, params) = handle.join().unwrap().unwrap();
        assert_eq!(sql, "SELECT * FROM T WHERE A = ?");
        assert_eq!(params, vec![SqlValue::Int(1)]);
    }
}

#[test]
fn test_dialect_quoting_and_booleans() {
    let query = Select::new()
        .columns(&["id"])
        .from("users")
        .where_clause(col("active").eq(true))
        .build();

    let mysql = RenderOptions::new()
        .dialect(Dialect::Mysql)
        .quote_policy(QuotePolicy::Always)
        .identifier_case(IdentifierCase::Lower);
    assert_eq!(
        literal_with(&query, &mysql),
        "SELECT `id` FROM `users` WHERE `active` = true"
    );

    let sqlite = RenderOptions::new()
        .dialect(Dialect::Sqlite)
        .identifier_case(IdentifierCase::Preserve)
        .uppercase_keywords(false);
    assert_eq!(
        literal_with(&query, &sqlite),
        "select id from users where active = 1"
    );
}

#[test]
fn test_select_aliases_are_reused_verbatim() {
    let query = Select::new()
        .columns(&["status", "count(*) AS n"])
        .from("orders")
        .group_by(&["status"])
        .order_by(&["n DESC", "status"])
        .build();

    let quoted = RenderOptions::new()
        .dialect(Dialect::Postgres)
        .quote_policy(QuotePolicy::Always);
    assert_eq!(
        literal_with(&query, &quoted),
        "SELECT \"STATUS\", COUNT(*) AS n FROM \"ORDERS\" GROUP BY \"STATUS\" ORDER BY n DESC, \"STATUS\""
    );

    // an alias of a subquery does not leak into the outer statement
    let outer = Select::new()
        .from("t")
        .where_clause(col("id").in_query(query))
        .order_by(&["n"])
        .build();
    assert!(literal(&outer).ends_with("ORDER BY N"));
}

#[test]
fn test_options_from_json() {
    let options = RenderOptions::from_json(
        r#"{"dialect": "postgres", "identifier_case": "preserve", "date_format": "%d.%m.%Y"}"#,
    )
    .unwrap();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let query = Select::new()
        .from("events")
        .where_clause(col("day").eq(day))
        .build();

    assert_eq!(literal_with(&query, &options), "SELECT * FROM events WHERE day = '01.03.2024'");
    let (sql, _) = parameterized_with(&query, &options);
    assert_eq!(sql, "SELECT * FROM events WHERE day = $1");
}

#[test]
fn test_bad_json_is_a_config_error() {
    let err = RenderOptions::from_json("{\"pad_width\": \"wide\"}").unwrap_err();
    assert!(matches!(err, BuildError::Config(_)));
}

#[test]
fn test_invalid_date_format_aborts_the_render() {
    let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let query = Select::new()
        .from("events")
        .where_clause(col("day").eq(day))
        .build();

    let options = RenderOptions::new().date_format("%Q");
    let err = query.to_sql(&options).unwrap_err();
    assert!(matches!(err, BuildError::InvalidDateFormat(_)));

    // parameterized output never formats the date
    assert!(query.to_parameterized(&options).is_ok());
}

#[test]
fn test_non_finite_floats_abort_literal_output() {
    let query = Select::new()
        .from("t")
        .where_clause(col("a").eq(f64::NAN))
        .or(col("b").lt(f64::INFINITY))
        .build();

    let err = query.to_sql(&RenderOptions::default()).unwrap_err();
    assert!(matches!(err, BuildError::NonFiniteFloat(f) if f.is_nan()));

    // bound values never pass through the literal formatter
    let (sql, params) = parameterized(&query);
    assert_eq!(sql, "SELECT * FROM T WHERE A = ? OR B < ?");
    assert_eq!(params.len(), 2);
}

#[test]
fn test_name_policy_reject() {
    let query = Select::new()
        .columns(&["price * 2"])
        .from("items")
        .build();

    assert_eq!(literal(&query), "SELECT price * 2 FROM ITEMS");

    let strict = RenderOptions::new().name_policy(NamePolicy::Reject);
    let err = query.to_sql(&strict).unwrap_err();
    assert!(matches!(err, BuildError::UnrecognizableName(name) if name == "price * 2"));
}

#[test]
fn test_raw_expression_holes() {
    let query = Select::new()
        .from("t")
        .where_clause(raw("coalesce(a, ?) = ?").bind(SqlValue::Null).bind(1))
        .build();

    let err = query.to_sql(&RenderOptions::default()).unwrap_err();
    assert!(matches!(err, BuildError::MalformedExpression { .. }));

    let options = RenderOptions::new().expression_default("DEFAULT");
    assert_eq!(
        literal_with(&query, &options),
        "SELECT * FROM T WHERE coalesce(a, DEFAULT) = 1"
    );
}

#[test]
fn test_post_processor_closure() {
    let query = Delete::new()
        .from("sessions")
        .where_clause(col("expired").eq(true))
        .build()
        .with_post_processor(|sql: String, _: &RenderOptions| format!("{sql};"));

    assert_eq!(literal(&query), "DELETE FROM SESSIONS WHERE EXPIRED = true;");
}

struct Tagged;

impl PostProcessor for Tagged {
    fn transform_sql(&self, sql: String, _options: &RenderOptions) -> String {
        format!("/* app */ {sql}")
    }

    fn transform_statement(&self, rendered: Rendered, options: &RenderOptions) -> Rendered {
        let mut params = rendered.params;
        params.retain(|p| !p.is_null());
        Rendered {
            sql: self.transform_sql(rendered.sql, options),
            params,
        }
    }
}

#[test]
fn test_post_processor_sees_the_whole_statement() {
    let inner = Select::new().from("t").build().with_post_processor(Tagged);
    let query = Insert::new()
        .into_table("archive")
        .columns(&["id", "note"])
        .values(vec![SqlValue::Int(1), SqlValue::Null])
        .build()
        .with_post_processor(Tagged);

    let (sql, params) = parameterized(&query);
    assert_eq!(sql, "/* app */ INSERT INTO ARCHIVE (ID, NOTE) VALUES (?, ?)");
    assert_eq!(params, vec![SqlValue::Int(1)]);

    // hooks of embedded queries do not run
    let outer = Select::new()
        .from("x")
        .where_clause(exists(inner))
        .build();
    assert_eq!(literal(&outer), "SELECT * FROM X WHERE EXISTS (SELECT * FROM T)");
}

#[test]
fn test_with_union_and_update_together() {
    let recent = Select::new()
        .columns(&["id"])
        .from("orders")
        .where_clause(col("year").eq(2024))
        .union(
            Select::new()
                .columns(&["id"])
                .from("legacy_orders")
                .build(),
        )
        .build();
    let query = With::new("recent", recent)
        .select()
        .column("count(*) AS n")
        .from("recent")
        .build();

    assert_eq!(
        literal(&query),
        "WITH RECENT AS (SELECT ID FROM ORDERS WHERE YEAR = 2024 UNION SELECT ID FROM LEGACY_ORDERS) \
         SELECT COUNT(*) AS n FROM RECENT"
    );

    let update = Update::new()
        .table("orders")
        .set("flag", true)
        .where_clause(col("id").in_query(query))
        .build();
    let (_, params) = parameterized(&update);
    assert_eq!(params, vec![SqlValue::Bool(true), SqlValue::Int(2024)]);
}

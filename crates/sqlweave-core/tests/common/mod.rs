#![allow(dead_code)]

use std::sync::Once;

use sqlweave_core::{Query, RenderOptions, SqlValue};

static TRACING: Once = Once::new();

/// Routes render logs to the test output; `RUST_LOG` is not consulted.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    });
}

pub fn literal_with(query: &Query, options: &RenderOptions) -> String {
    init_tracing();
    query
        .to_sql(options)
        .unwrap_or_else(|e| panic!("Failed to render: {query:?}\nError: {e}"))
}

pub fn literal(query: &Query) -> String {
    literal_with(query, &RenderOptions::default())
}

pub fn parameterized_with(query: &Query, options: &RenderOptions) -> (String, Vec<SqlValue>) {
    init_tracing();
    query
        .to_parameterized(options)
        .unwrap_or_else(|e| panic!("Failed to render: {query:?}\nError: {e}"))
}

pub fn parameterized(query: &Query) -> (String, Vec<SqlValue>) {
    parameterized_with(query, &RenderOptions::default())
}

pub fn pretty(query: &Query) -> String {
    literal_with(query, &RenderOptions::new().pretty(true))
}

/// Counts `?` placeholders outside quoted literals.
pub fn placeholder_count(sql: &str) -> usize {
    let mut in_literal = false;
    sql.chars()
        .filter(|c| {
            if *c == '\'' {
                in_literal = !in_literal;
            }
            *c == '?' && !in_literal
        })
        .count()
}

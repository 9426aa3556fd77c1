//! WITH lists.

use std::sync::Arc;

use super::chain::{Clause, Node};
use super::query::Query;
use super::select::Select;

/// A `WITH [RECURSIVE]` list of named subqueries, followed by a SELECT.
///
/// # Example
///
/// ```
/// use sqlweave_core::{col, RenderOptions, Select, With};
///
/// let recent = Select::new()
///     .from("orders")
///     .where_clause(col("year").eq(2024))
///     .build();
/// let query = With::new("recent", recent)
///     .select()
///     .columns(&["id"])
///     .from("recent")
///     .build();
///
/// assert_eq!(
///     query.to_sql(&RenderOptions::default()).unwrap(),
///     "WITH RECENT AS (SELECT * FROM ORDERS WHERE YEAR = 2024) SELECT ID FROM RECENT"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct With {
    recursive: bool,
    ctes: Vec<(String, Query)>,
}

impl With {
    /// Starts a WITH list with its first entry.
    #[must_use]
    pub fn new(name: &str, query: Query) -> Self {
        Self {
            recursive: false,
            ctes: vec![(String::from(name), query)],
        }
    }

    /// Adds another named subquery.
    #[must_use]
    pub fn cte(mut self, name: &str, query: Query) -> Self {
        self.ctes.push((String::from(name), query));
        self
    }

    /// Marks the list `RECURSIVE`.
    #[must_use]
    pub const fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(
            Clause::With {
                recursive: self.recursive,
                ctes: self.ctes,
            },
            None,
        )
    }

    /// Starts the main SELECT.
    #[must_use]
    pub fn select(self) -> Select {
        Select::after(self.seal())
    }
}

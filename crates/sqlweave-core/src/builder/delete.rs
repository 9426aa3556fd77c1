//! DELETE stages.

use std::sync::Arc;

use super::chain::{Clause, Node};
use super::filter::{matching, Modifying, WhereClause};
use super::query::Query;
use crate::condition::{Condition, Term};
use crate::schema::ValueHolder;

/// Entry point of a DELETE statement.
#[derive(Debug, Clone, Default)]
pub struct Delete;

impl Delete {
    /// Creates a new DELETE builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Specifies the table to delete from.
    #[must_use]
    pub fn from(self, table: &str) -> DeleteClause {
        DeleteClause {
            table: String::from(table),
        }
    }
}

/// `DELETE FROM table` under construction.
#[derive(Debug, Clone)]
pub struct DeleteClause {
    table: String,
}

impl DeleteClause {
    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::DeleteFrom(self.table), None)
    }

    /// Adds a WHERE clause.
    #[must_use]
    pub fn where_clause(self, term: impl Into<Term>) -> WhereClause<Modifying> {
        WhereClause::new(self.seal(), Condition::new().add(term))
    }

    /// Adds a WHERE clause matching every entry of `holder`.
    #[must_use]
    pub fn where_all<H: ValueHolder + ?Sized>(self, holder: &H) -> WhereClause<Modifying> {
        WhereClause::new(self.seal(), matching(holder))
    }

    /// Finishes the statement; deletes every row.
    #[must_use]
    pub fn build(self) -> Query {
        Query::new(self.seal())
    }
}

//! UPDATE stages.

use std::sync::Arc;

use super::chain::{Clause, Node, SetValue};
use super::filter::{matching, Modifying, WhereClause};
use super::query::Query;
use crate::condition::{Condition, RawExpr, Term};
use crate::schema::ValueHolder;
use crate::value::ToSqlValue;

/// Entry point of an UPDATE statement.
#[derive(Debug, Clone, Default)]
pub struct Update;

impl Update {
    /// Creates a new UPDATE builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Specifies the table to update.
    #[must_use]
    pub fn table(self, table: &str) -> UpdateClause {
        UpdateClause {
            table: String::from(table),
        }
    }
}

/// `UPDATE table` waiting for its first assignment.
#[derive(Debug, Clone)]
pub struct UpdateClause {
    table: String,
}

impl UpdateClause {
    fn start(self) -> SetClause {
        SetClause {
            prev: Node::seal(Clause::Update(self.table), None),
            assignments: vec![],
        }
    }

    /// Adds a SET assignment.
    #[must_use]
    pub fn set<T: ToSqlValue>(self, column: &str, value: T) -> SetClause {
        self.start().set(column, value)
    }

    /// Adds a SET assignment with a raw right-hand side.
    #[must_use]
    pub fn set_expr(self, column: &str, expr: RawExpr) -> SetClause {
        self.start().set_expr(column, expr)
    }

    /// Adds one assignment per entry of `holder`; an empty holder fails at
    /// render time.
    #[must_use]
    pub fn set_all<H: ValueHolder + ?Sized>(self, holder: &H) -> SetClause {
        self.start().set_all(holder)
    }
}

/// SET assignments under construction.
#[derive(Debug, Clone)]
pub struct SetClause {
    prev: Arc<Node>,
    assignments: Vec<(String, SetValue)>,
}

impl SetClause {
    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::Set(self.assignments), Some(self.prev))
    }

    /// Adds another SET assignment.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.assignments
            .push((String::from(column), SetValue::Value(value.to_sql_value())));
        self
    }

    /// Adds another assignment with a raw right-hand side.
    #[must_use]
    pub fn set_expr(mut self, column: &str, expr: RawExpr) -> Self {
        self.assignments.push((String::from(column), SetValue::Expr(expr)));
        self
    }

    /// Adds one assignment per entry of `holder`.
    #[must_use]
    pub fn set_all<H: ValueHolder + ?Sized>(mut self, holder: &H) -> Self {
        self.assignments.extend(
            holder
                .values()
                .into_iter()
                .map(|(column, value)| (column, SetValue::Value(value))),
        );
        self
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

    /// Finishes the statement without a WHERE clause.
    #[must_use]
    pub fn build(self) -> Query {
        Query::new(self.seal())
    }
}

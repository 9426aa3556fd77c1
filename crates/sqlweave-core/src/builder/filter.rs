//! WHERE stage, shared by SELECT, UPDATE and DELETE.

use std::marker::PhantomData;
use std::sync::Arc;

use super::chain::{Clause, Node};
use super::query::Query;
use crate::condition::{col, Condition, Term};
use crate::render::Connective;
use crate::schema::ValueHolder;

// Typestate markers

/// Marker: WHERE of a SELECT, which may be followed by grouping and ordering.
#[derive(Debug, Clone, Copy)]
pub struct Selecting;
/// Marker: WHERE of an UPDATE or DELETE, which ends the statement.
#[derive(Debug, Clone, Copy)]
pub struct Modifying;

/// `column = value` for every entry of `holder`, joined with `AND`.
pub(crate) fn matching<H: ValueHolder + ?Sized>(holder: &H) -> Condition {
    holder
        .values()
        .into_iter()
        .fold(Condition::new(), |condition, (column, value)| {
            condition.add(col(&column).eq(value))
        })
}

/// WHERE clause under construction.
#[derive(Debug, Clone)]
pub struct WhereClause<S> {
    prev: Arc<Node>,
    condition: Condition,
    _stmt: PhantomData<S>,
}

impl<S> WhereClause<S> {
    pub(crate) fn new(prev: Arc<Node>, condition: Condition) -> Self {
        Self {
            prev,
            condition,
            _stmt: PhantomData,
        }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::Where(self.condition), Some(self.prev))
    }

    /// Adds an operand joined with `AND`.
    #[must_use]
    pub fn and(mut self, term: impl Into<Term>) -> Self {
        self.condition.push_connective(Connective::And);
        self.condition.push(term);
        self
    }

    /// Adds an operand joined with `OR`.
    #[must_use]
    pub fn or(mut self, term: impl Into<Term>) -> Self {
        self.condition.push_connective(Connective::Or);
        self.condition.push(term);
        self
    }

    /// Finishes the statement.
    #[must_use]
    pub fn build(self) -> Query {
        Query::new(self.seal())
    }
}

select_continuations!(WhereClause<Selecting>: hierarchy, group, order, union);

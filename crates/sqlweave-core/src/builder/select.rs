//! SELECT stages.

use std::sync::Arc;

use super::chain::{Clause, JoinKind, Node, OrderItem};
use super::query::Query;
use crate::condition::{Condition, Term};
use crate::schema::Table;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| String::from(*s)).collect()
}

/// SELECT list under construction.
///
/// With no columns the list renders as `*`.
#[derive(Debug, Clone, Default)]
pub struct Select {
    prev: Option<Arc<Node>>,
    distinct: bool,
    columns: Vec<String>,
}

impl Select {
    /// Creates a new SELECT builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// SELECT following an earlier clause (a WITH list).
    pub(crate) fn after(prev: Arc<Node>) -> Self {
        Self {
            prev: Some(prev),
            ..Self::default()
        }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(
            Clause::Select {
                distinct: self.distinct,
                columns: self.columns,
            },
            self.prev,
        )
    }

    /// Adds columns to select; entries may carry an alias (`max(price) AS top`).
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns.extend(owned(cols));
        self
    }

    /// Adds one column.
    #[must_use]
    pub fn column(mut self, col: &str) -> Self {
        self.columns.push(String::from(col));
        self
    }

    /// Selects every column listed by a [`Table`].
    #[must_use]
    pub fn columns_of<T: Table>(self) -> Self {
        self.columns(T::COLUMNS)
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Specifies the table to select from; `users u` and `users AS u` alias it.
    #[must_use]
    pub fn from(self, table: &str) -> FromClause {
        FromClause {
            prev: self.seal(),
            tables: vec![String::from(table)],
        }
    }

    /// Selects from the table of a [`Table`] type.
    #[must_use]
    pub fn from_table<T: Table>(self) -> FromClause {
        self.from(T::table_name())
    }
}

select_continuations!(Select: build);

/// FROM list under construction.
#[derive(Debug, Clone)]
pub struct FromClause {
    prev: Arc<Node>,
    tables: Vec<String>,
}

impl FromClause {
    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::From(self.tables), Some(self.prev))
    }

    /// Adds another table to the FROM list.
    #[must_use]
    pub fn from(mut self, table: &str) -> Self {
        self.tables.push(String::from(table));
        self
    }
}

select_continuations!(FromClause: join, filter, hierarchy, group, order, union, build);

/// JOIN under construction.
#[derive(Debug, Clone)]
pub struct JoinClause {
    prev: Arc<Node>,
    kind: JoinKind,
    table: String,
    condition: Condition,
}

impl JoinClause {
    pub(crate) fn new(prev: Arc<Node>, kind: JoinKind, table: &str) -> Self {
        Self {
            prev,
            kind,
            table: String::from(table),
            condition: Condition::new(),
        }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(
            Clause::Join {
                kind: self.kind,
                table: self.table,
                on: self.condition,
            },
            Some(self.prev),
        )
    }

    /// Adds a join condition; several calls are joined with `AND`.
    #[must_use]
    pub fn on(mut self, term: impl Into<Term>) -> Self {
        self.condition.push(term);
        self
    }
}

condition_methods!(JoinClause);
select_continuations!(JoinClause: join, filter, hierarchy, group, order, union, build);

/// START WITH clause under construction.
#[derive(Debug, Clone)]
pub struct StartWithClause {
    prev: Arc<Node>,
    condition: Condition,
}

impl StartWithClause {
    pub(crate) fn new(prev: Arc<Node>, term: Term) -> Self {
        Self {
            prev,
            condition: Condition::new().add(term),
        }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::StartWith(self.condition), Some(self.prev))
    }

    /// Starts the `CONNECT BY` clause that goes with this root condition.
    #[must_use]
    pub fn connect_by(self, term: impl Into<Term>) -> ConnectByClause {
        ConnectByClause::new(self.seal(), term.into())
    }
}

condition_methods!(StartWithClause);

/// CONNECT BY clause under construction.
#[derive(Debug, Clone)]
pub struct ConnectByClause {
    prev: Arc<Node>,
    condition: Condition,
}

impl ConnectByClause {
    pub(crate) fn new(prev: Arc<Node>, term: Term) -> Self {
        Self {
            prev,
            condition: Condition::new().add(term),
        }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::ConnectBy(self.condition), Some(self.prev))
    }
}

condition_methods!(ConnectByClause);
select_continuations!(ConnectByClause: group, order, union, build);

/// GROUP BY list under construction.
#[derive(Debug, Clone)]
pub struct GroupByClause {
    prev: Arc<Node>,
    columns: Vec<String>,
}

impl GroupByClause {
    pub(crate) fn new(prev: Arc<Node>, columns: &[&str]) -> Self {
        Self {
            prev,
            columns: owned(columns),
        }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::GroupBy(self.columns), Some(self.prev))
    }

    /// Starts the HAVING clause.
    #[must_use]
    pub fn having(self, term: impl Into<Term>) -> HavingClause {
        HavingClause {
            prev: self.seal(),
            condition: Condition::new().add(term),
        }
    }
}

select_continuations!(GroupByClause: order, union, build);

/// HAVING clause under construction.
#[derive(Debug, Clone)]
pub struct HavingClause {
    prev: Arc<Node>,
    condition: Condition,
}

impl HavingClause {
    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::Having(self.condition), Some(self.prev))
    }
}

condition_methods!(HavingClause);
select_continuations!(HavingClause: order, union, build);

/// ORDER BY list under construction.
#[derive(Debug, Clone)]
pub struct OrderByClause {
    prev: Arc<Node>,
    items: Vec<OrderItem>,
}

impl OrderByClause {
    pub(crate) fn new(prev: Arc<Node>, columns: &[&str]) -> Self {
        Self {
            prev,
            items: columns.iter().map(|c| OrderItem::parse(c)).collect(),
        }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(Clause::OrderBy(self.items), Some(self.prev))
    }

    /// Appends more entries.
    #[must_use]
    pub fn then_by(mut self, columns: &[&str]) -> Self {
        self.items.extend(columns.iter().map(|c| OrderItem::parse(c)));
        self
    }

    /// Appends a descending entry.
    #[must_use]
    pub fn then_desc(mut self, column: &str) -> Self {
        self.items.push(OrderItem::desc(column));
        self
    }
}

select_continuations!(OrderByClause: build);

/// A query followed by `UNION [ALL]` and another query.
#[derive(Debug, Clone)]
pub struct UnionClause {
    prev: Arc<Node>,
    all: bool,
    query: Query,
}

impl UnionClause {
    pub(crate) const fn new(prev: Arc<Node>, all: bool, query: Query) -> Self {
        Self { prev, all, query }
    }

    fn seal(self) -> Arc<Node> {
        Node::seal(
            Clause::Union {
                all: self.all,
                query: self.query,
            },
            Some(self.prev),
        )
    }
}

select_continuations!(UnionClause: order, union, build);

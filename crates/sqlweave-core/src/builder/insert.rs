//! INSERT stages.

use std::sync::Arc;

use super::chain::{Clause, Node, SetValue};
use super::query::Query;
use crate::schema::{Table, ValueHolder};
use crate::value::ToSqlValue;

fn row<I>(values: I) -> Vec<SetValue>
where
    I: IntoIterator,
    I::Item: ToSqlValue,
{
    values
        .into_iter()
        .map(|v| SetValue::Value(v.to_sql_value()))
        .collect()
}

/// Entry point of an INSERT statement.
#[derive(Debug, Clone, Default)]
pub struct Insert;

impl Insert {
    /// Creates a new INSERT builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Specifies the target table.
    #[must_use]
    pub fn into_table(self, table: &str) -> InsertClause {
        InsertClause {
            table: String::from(table),
            columns: vec![],
        }
    }

    /// Targets the table of a [`Table`] type with all of its columns.
    #[must_use]
    pub fn into_table_of<T: Table>(self) -> InsertClause {
        self.into_table(T::table_name()).columns(T::COLUMNS)
    }
}

/// `INSERT INTO table (columns)` under construction.
#[derive(Debug, Clone)]
pub struct InsertClause {
    table: String,
    columns: Vec<String>,
}

impl InsertClause {
    fn seal(self) -> Arc<Node> {
        Node::seal(
            Clause::InsertInto {
                table: self.table,
                columns: self.columns,
            },
            None,
        )
    }

    /// Specifies the columns to insert into.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns.extend(cols.iter().map(|c| String::from(*c)));
        self
    }

    /// Adds the first VALUES row.
    #[must_use]
    pub fn values<T: ToSqlValue>(self, vals: Vec<T>) -> ValuesClause {
        self.values_many(vec![vals])
    }

    /// Adds several VALUES rows at once; an empty list fails at render time.
    ///
    /// Every row must hold one value per listed column. Without a column list
    /// every row must be as wide as the first.
    #[must_use]
    pub fn values_many<T: ToSqlValue>(self, rows: Vec<Vec<T>>) -> ValuesClause {
        let width = (!self.columns.is_empty()).then_some(self.columns.len());
        ValuesClause {
            prev: self.seal(),
            width,
            rows: rows.into_iter().map(row).collect(),
        }
    }

    /// Adds a row taken from a [`ValueHolder`].
    ///
    /// When no columns were given, the holder's column names are used.
    #[must_use]
    pub fn values_from<H: ValueHolder + ?Sized>(mut self, holder: &H) -> ValuesClause {
        let (columns, values): (Vec<String>, Vec<_>) = holder.values().into_iter().unzip();
        if self.columns.is_empty() {
            self.columns = columns;
        }
        self.values(values)
    }

    /// Inserts the rows of a query: `INSERT INTO t (..) SELECT ..`.
    #[must_use]
    pub fn select(self, query: Query) -> InsertSelect {
        InsertSelect {
            prev: self.seal(),
            query,
        }
    }
}

/// VALUES rows under construction.
#[derive(Debug, Clone)]
pub struct ValuesClause {
    prev: Arc<Node>,
    width: Option<usize>,
    rows: Vec<Vec<SetValue>>,
}

impl ValuesClause {
    /// Adds another row.
    #[must_use]
    pub fn and_values<T: ToSqlValue>(mut self, vals: Vec<T>) -> Self {
        self.rows.push(row(vals));
        self
    }

    /// Adds another row taken from a [`ValueHolder`].
    #[must_use]
    pub fn and_values_from<H: ValueHolder + ?Sized>(mut self, holder: &H) -> Self {
        self.rows.push(row(holder.values().into_iter().map(|(_, v)| v)));
        self
    }

    /// Finishes the statement.
    #[must_use]
    pub fn build(self) -> Query {
        Query::new(Node::seal(
            Clause::Values {
                width: self.width,
                rows: self.rows,
            },
            Some(self.prev),
        ))
    }
}

/// `INSERT INTO .. SELECT ..` under construction.
#[derive(Debug, Clone)]
pub struct InsertSelect {
    prev: Arc<Node>,
    query: Query,
}

impl InsertSelect {
    /// Finishes the statement.
    #[must_use]
    pub fn build(self) -> Query {
        Query::new(Node::seal(Clause::Source(self.query), Some(self.prev)))
    }
}

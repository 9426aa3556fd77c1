//! Chained statement builder.
//!
//! Each call returns a stage type that only offers the clauses that may follow
//! it, and the stage seals its clause into an immutable chain when the next
//! stage begins. `build()` turns the chain into a [`Query`].
//!
//! # Example
//!
//! ```rust
//! use sqlweave_core::{col, RenderOptions, Select};
//!
//! let query = Select::new()
//!     .columns(&["col1", "col2"])
//!     .from("test")
//!     .where_clause(col("col1").eq(1))
//!     .and(col("col2").eq(None::<i32>))
//!     .build();
//!
//! let sql = query.to_sql(&RenderOptions::default()).unwrap();
//! assert_eq!(sql, "SELECT COL1, COL2 FROM TEST WHERE COL1 = 1");
//! ```

/// `and` / `or` for stages whose pending clause keeps a `condition` field.
macro_rules! condition_methods {
    ($($stage:ty),+ $(,)?) => {$(
        impl $stage {
            /// Adds an operand joined with `AND`.
            #[must_use]
            pub fn and(mut self, term: impl Into<$crate::condition::Term>) -> Self {
                self.condition.push_connective($crate::render::Connective::And);
                self.condition.push(term);
                self
            }

            /// Adds an operand joined with `OR`.
            #[must_use]
            pub fn or(mut self, term: impl Into<$crate::condition::Term>) -> Self {
                self.condition.push_connective($crate::render::Connective::Or);
                self.condition.push(term);
                self
            }
        }
    )+};
}

/// Continuations of a SELECT chain, grouped by the clause they start.
macro_rules! select_continuations {
    (@build $stage:ty) => {
        impl $stage {
            /// Finishes the statement.
            #[must_use]
            pub fn build(self) -> $crate::builder::Query {
                $crate::builder::Query::new(self.seal())
            }
        }
    };
    (@join $stage:ty) => {
        impl $stage {
            /// Adds an `INNER JOIN`; add its condition with `on`.
            #[must_use]
            pub fn join(self, table: &str) -> $crate::builder::JoinClause {
                $crate::builder::JoinClause::new(self.seal(), $crate::builder::JoinKind::Inner, table)
            }

            /// Adds a `LEFT JOIN`.
            #[must_use]
            pub fn left_join(self, table: &str) -> $crate::builder::JoinClause {
                $crate::builder::JoinClause::new(self.seal(), $crate::builder::JoinKind::Left, table)
            }

            /// Adds a `RIGHT JOIN`.
            #[must_use]
            pub fn right_join(self, table: &str) -> $crate::builder::JoinClause {
                $crate::builder::JoinClause::new(self.seal(), $crate::builder::JoinKind::Right, table)
            }

            /// Adds a `FULL JOIN`.
            #[must_use]
            pub fn full_join(self, table: &str) -> $crate::builder::JoinClause {
                $crate::builder::JoinClause::new(self.seal(), $crate::builder::JoinKind::Full, table)
            }

            /// Adds a `CROSS JOIN`.
            #[must_use]
            pub fn cross_join(self, table: &str) -> $crate::builder::JoinClause {
                $crate::builder::JoinClause::new(self.seal(), $crate::builder::JoinKind::Cross, table)
            }
        }
    };
    (@filter $stage:ty) => {
        impl $stage {
            /// Starts the WHERE clause.
            #[must_use]
            pub fn where_clause(
                self,
                term: impl Into<$crate::condition::Term>,
            ) -> $crate::builder::WhereClause<$crate::builder::Selecting> {
                $crate::builder::WhereClause::new(self.seal(), $crate::condition::Condition::new().add(term))
            }

            /// Starts the WHERE clause with `column = value` for every entry
            /// of `holder`, joined with `AND`.
            #[must_use]
            pub fn where_all<H: $crate::schema::ValueHolder + ?Sized>(
                self,
                holder: &H,
            ) -> $crate::builder::WhereClause<$crate::builder::Selecting> {
                $crate::builder::WhereClause::new(self.seal(), $crate::builder::filter::matching(holder))
            }
        }
    };
    (@hierarchy $stage:ty) => {
        impl $stage {
            /// Starts a `START WITH` clause.
            #[must_use]
            pub fn start_with(
                self,
                term: impl Into<$crate::condition::Term>,
            ) -> $crate::builder::StartWithClause {
                $crate::builder::StartWithClause::new(self.seal(), term.into())
            }

            /// Starts a `CONNECT BY` clause.
            #[must_use]
            pub fn connect_by(
                self,
                term: impl Into<$crate::condition::Term>,
            ) -> $crate::builder::ConnectByClause {
                $crate::builder::ConnectByClause::new(self.seal(), term.into())
            }
        }
    };
    (@group $stage:ty) => {
        impl $stage {
            /// Adds a `GROUP BY` clause; an empty list renders nothing.
            #[must_use]
            pub fn group_by(self, columns: &[&str]) -> $crate::builder::GroupByClause {
                $crate::builder::GroupByClause::new(self.seal(), columns)
            }
        }
    };
    (@order $stage:ty) => {
        impl $stage {
            /// Adds an `ORDER BY` clause. Entries may end in `ASC` or `DESC`.
            #[must_use]
            pub fn order_by(self, columns: &[&str]) -> $crate::builder::OrderByClause {
                $crate::builder::OrderByClause::new(self.seal(), columns)
            }

            /// Adds an `ORDER BY column DESC` clause.
            #[must_use]
            pub fn order_by_desc(self, column: &str) -> $crate::builder::OrderByClause {
                $crate::builder::OrderByClause::new(self.seal(), &[]).then_desc(column)
            }
        }
    };
    (@union $stage:ty) => {
        impl $stage {
            /// Appends `UNION` and another query.
            #[must_use]
            pub fn union(self, query: $crate::builder::Query) -> $crate::builder::UnionClause {
                $crate::builder::UnionClause::new(self.seal(), false, query)
            }

            /// Appends `UNION ALL` and another query.
            #[must_use]
            pub fn union_all(self, query: $crate::builder::Query) -> $crate::builder::UnionClause {
                $crate::builder::UnionClause::new(self.seal(), true, query)
            }
        }
    };
    ($stage:ty: $($group:ident),+ $(,)?) => {
        $( select_continuations!(@$group $stage); )+
    };
}

mod chain;
mod delete;
mod filter;
mod insert;
mod query;
mod select;
mod update;
mod with;

pub use chain::{Direction, JoinKind, OrderItem, SetValue};
pub use delete::{Delete, DeleteClause};
pub use filter::{Modifying, Selecting, WhereClause};
pub use insert::{Insert, InsertClause, InsertSelect, ValuesClause};
pub use query::{PostProcessor, Query, Rendered};
pub use select::{
    ConnectByClause, FromClause, GroupByClause, HavingClause, JoinClause, OrderByClause, Select,
    StartWithClause, UnionClause,
};
pub use update::{SetClause, Update, UpdateClause};
pub use with::With;

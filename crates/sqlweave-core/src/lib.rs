//! # sqlweave-core
//!
//! A chained SQL statement builder that renders either literal SQL or a
//! parameterized statement with its ordered values.
//!
//! This crate provides:
//! - Stage types for SELECT, INSERT, UPDATE, DELETE and WITH, chained one
//!   clause at a time
//! - Condition trees whose NULL comparisons are dropped (or turned into
//!   `IS NULL`) at render time
//! - Name resolution with configurable casing, quoting and aliasing
//! - Literal and placeholder rendering driven by [`RenderOptions`]
//!
//! ## Building a statement
//!
//! ```rust
//! use sqlweave_core::{col, RenderOptions, Select, SqlValue};
//!
//! let query = Select::new()
//!     .columns(&["col1", "col2"])
//!     .from("test")
//!     .where_clause(col("col1").eq(1))
//!     .or(col("col2").eq(true))
//!     .build();
//!
//! let options = RenderOptions::default();
//! assert_eq!(
//!     query.to_sql(&options).unwrap(),
//!     "SELECT COL1, COL2 FROM TEST WHERE COL1 = 1 OR COL2 = true"
//! );
//!
//! let (sql, params) = query.to_parameterized(&options).unwrap();
//! assert_eq!(sql, "SELECT COL1, COL2 FROM TEST WHERE COL1 = ? OR COL2 = ?");
//! assert_eq!(params, vec![SqlValue::Int(1), SqlValue::Bool(true)]);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Parameterized output keeps values out of the statement text, and literal
//! output escapes them:
//!
//! ```rust
//! use sqlweave_core::{col, RenderOptions, Select};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let query = Select::new()
//!     .columns(&["id"])
//!     .from("users")
//!     .where_clause(col("name").eq(user_input))
//!     .build();
//!
//! let (sql, params) = query.to_parameterized(&RenderOptions::default()).unwrap();
//! assert_eq!(sql, "SELECT ID FROM USERS WHERE NAME = ?");
//! assert_eq!(params.len(), 1);
//! ```

pub mod builder;
pub mod condition;
pub mod dialect;
pub mod error;
pub mod name;
pub mod options;
pub mod render;
pub mod schema;
pub mod value;

pub use builder::{Delete, Insert, PostProcessor, Query, Rendered, Select, Update, With};
pub use condition::{col, exists, not_exists, raw, Comparison, Condition, Operator, RawExpr};
pub use dialect::Dialect;
pub use error::{BuildError, Result};
pub use options::{IdentifierCase, NamePolicy, QuotePolicy, RenderOptions};
pub use schema::{Table, ValueHolder};
pub use value::{SqlValue, ToSqlValue};

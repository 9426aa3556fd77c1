//! Schema collaborators.
//!
//! [`Table`] names a table and its columns; [`ValueHolder`] supplies
//! `(column, value)` pairs for bulk SET, INSERT rows and WHERE equality.
//! Both can be derived with `sqlweave-derive`:
//!
//! ```ignore
//! use sqlweave_derive::{Table, ValueHolder};
//!
//! #[derive(Table, ValueHolder)]
//! #[table(name = "users")]
//! struct User {
//!     #[column(primary_key)]
//!     id: i64,
//!     #[column(name = "user_name")]
//!     name: String,
//! }
//! ```

use std::collections::BTreeMap;

use crate::value::SqlValue;

/// Trait for table metadata.
pub trait Table {
    /// The SQL table name.
    const NAME: &'static str;

    /// List of all column names.
    const COLUMNS: &'static [&'static str];

    /// The primary key column name, if any.
    const PRIMARY_KEY: Option<&'static str>;

    /// Returns the table name.
    #[must_use]
    fn table_name() -> &'static str {
        Self::NAME
    }
}

/// A source of `(column, value)` pairs, in column order.
pub trait ValueHolder {
    /// Returns the column/value pairs.
    fn values(&self) -> Vec<(String, SqlValue)>;
}

impl ValueHolder for [(String, SqlValue)] {
    fn values(&self) -> Vec<(String, SqlValue)> {
        self.to_vec()
    }
}

impl ValueHolder for Vec<(String, SqlValue)> {
    fn values(&self) -> Vec<(String, SqlValue)> {
        self.clone()
    }
}

impl ValueHolder for [(&str, SqlValue)] {
    fn values(&self) -> Vec<(String, SqlValue)> {
        self.iter()
            .map(|(column, value)| (String::from(*column), value.clone()))
            .collect()
    }
}

impl<const N: usize> ValueHolder for [(&str, SqlValue); N] {
    fn values(&self) -> Vec<(String, SqlValue)> {
        self.as_slice().values()
    }
}

impl ValueHolder for BTreeMap<String, SqlValue> {
    fn values(&self) -> Vec<(String, SqlValue)> {
        self.iter()
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Invoices;

    impl Table for Invoices {
        const NAME: &'static str = "invoices";
        const COLUMNS: &'static [&'static str] = &["id", "total"];
        const PRIMARY_KEY: Option<&'static str> = Some("id");
    }

    #[test]
    fn test_table_name_defaults_to_const() {
        assert_eq!(Invoices::table_name(), "invoices");
        assert_eq!(Invoices::COLUMNS.len(), 2);
    }

    #[test]
    fn test_array_holder_keeps_order() {
        let holder = [("b", SqlValue::Int(2)), ("a", SqlValue::Int(1))];
        let values = holder.values();
        assert_eq!(values[0].0, "b");
        assert_eq!(values[1], (String::from("a"), SqlValue::Int(1)));
    }

    #[test]
    fn test_map_holder_is_sorted() {
        let mut map = BTreeMap::new();
        map.insert(String::from("z"), SqlValue::Null);
        map.insert(String::from("a"), SqlValue::Bool(true));
        let columns: Vec<String> = ValueHolder::values(&map).into_iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["a", "z"]);
    }
}

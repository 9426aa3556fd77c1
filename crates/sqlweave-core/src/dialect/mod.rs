//! SQL Dialect support.
//!
//! Dialects only decide surface tokens: the identifier quote character, the
//! parameter placeholder style and the boolean literals. Statement structure is
//! the same for every dialect.

use serde::{Deserialize, Serialize};

/// Placeholder style used in parameterized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` for every parameter.
    Question,
    /// `$1`, `$2`, ... numbered across the whole render pass.
    Numbered,
}

/// The dialect a statement is rendered for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// ANSI-flavoured output.
    #[default]
    Generic,
    /// PostgreSQL.
    Postgres,
    /// MySQL / MariaDB.
    Mysql,
    /// SQLite.
    Sqlite,
}

impl Dialect {
    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    #[must_use]
    pub const fn identifier_quote(self) -> char {
        match self {
            Self::Mysql => '`',
            Self::Generic | Self::Postgres | Self::Sqlite => '"',
        }
    }

    /// Returns the parameter placeholder style.
    #[must_use]
    pub const fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Self::Postgres => PlaceholderStyle::Numbered,
            Self::Generic | Self::Mysql | Self::Sqlite => PlaceholderStyle::Question,
        }
    }

    /// Returns the placeholder for the parameter at 1-based `position`.
    #[must_use]
    pub fn placeholder(self, position: usize) -> String {
        match self.placeholder_style() {
            PlaceholderStyle::Question => String::from("?"),
            PlaceholderStyle::Numbered => format!("${position}"),
        }
    }

    /// Returns the literal token for a boolean.
    #[must_use]
    pub const fn bool_literal(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::Sqlite, true) => "1",
            (Self::Sqlite, false) => "0",
            (_, true) => "true",
            (_, false) => "false",
        }
    }

    /// Quotes an identifier, doubling any embedded quote character.
    #[must_use]
    pub fn quote_identifier(self, name: &str) -> String {
        let quote = self.identifier_quote();
        let doubled = format!("{quote}{quote}");
        let body = name.replace(quote, &doubled);
        format!("{quote}{body}{quote}")
    }
}

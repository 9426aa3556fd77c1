//! Render configuration.
//!
//! [`RenderOptions`] is a plain value: build it with [`RenderOptions::new`] and
//! the chained setters, or load it from JSON. It never carries bound values;
//! those live in the per-pass [`RenderContext`](crate::render::RenderContext).

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::Result;

/// Case applied to undelimited identifiers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierCase {
    /// `col1` renders as `COL1`.
    #[default]
    Upper,
    /// `COL1` renders as `col1`.
    Lower,
    /// Identifiers are emitted as written.
    Preserve,
}

/// How identifiers are quoted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotePolicy {
    /// Identifiers written delimited stay delimited, others stay bare.
    #[default]
    Preserve,
    /// Delimiters are stripped from every identifier.
    Never,
    /// Every identifier is quoted with the dialect's quote character.
    Always,
}

/// What happens to a name that does not match the name grammar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Emit the raw text unchanged.
    #[default]
    PassThrough,
    /// Fail the render with [`BuildError::UnrecognizableName`](crate::BuildError::UnrecognizableName).
    Reject,
}

/// Formatting and binding rules for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Target dialect.
    pub dialect: Dialect,
    /// One clause per line with aligned keywords.
    pub pretty_print: bool,
    /// Indent level the outermost statement starts at.
    pub indent_level: usize,
    /// Width of the keyword column and of one indent step.
    pub pad_width: usize,
    /// Separator placed between clauses in pretty mode.
    pub line_delimiter: String,
    /// Upper-case SQL keywords and function names.
    pub uppercase_keywords: bool,
    /// Case applied to undelimited identifiers.
    pub identifier_case: IdentifierCase,
    /// Identifier quoting.
    pub quote_policy: QuotePolicy,
    /// Emit placeholders and collect values instead of literals.
    pub parameterize: bool,
    /// Drop predicates compared against NULL instead of promoting them to `IS NULL`.
    pub elide_null_predicates: bool,
    /// Start every connective of a condition on its own line.
    pub condition_on_newline: bool,
    /// chrono format for `DATE` values.
    pub date_format: String,
    /// chrono format for `TIMESTAMP` values.
    pub datetime_format: String,
    /// chrono format for `TIME` values.
    pub time_format: String,
    /// Handling of names outside the name grammar.
    pub name_policy: NamePolicy,
    /// Emit `AS` before column aliases.
    pub column_alias_as: bool,
    /// Emit `AS` before table aliases.
    pub table_alias_as: bool,
    /// Token substituted for null arguments of raw expressions.
    pub expression_default: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Generic,
            pretty_print: false,
            indent_level: 0,
            pad_width: "SELECT ".len(),
            line_delimiter: String::from("\n"),
            uppercase_keywords: true,
            identifier_case: IdentifierCase::Upper,
            quote_policy: QuotePolicy::Preserve,
            parameterize: false,
            elide_null_predicates: true,
            condition_on_newline: false,
            date_format: String::from("%Y-%m-%d"),
            datetime_format: String::from("%Y-%m-%d %H:%M:%S"),
            time_format: String::from("%H:%M:%S"),
            name_policy: NamePolicy::PassThrough,
            column_alias_as: true,
            table_alias_as: true,
            expression_default: None,
        }
    }
}

impl RenderOptions {
    /// Creates the default options: literal, single-line, upper-case output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Config`](crate::BuildError::Config) when the
    /// document is not valid options JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the target dialect.
    #[must_use]
    pub const fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Turns pretty printing on or off.
    #[must_use]
    pub const fn pretty(mut self, on: bool) -> Self {
        self.pretty_print = on;
        self
    }

    /// Turns parameterized output on or off.
    #[must_use]
    pub const fn parameterized(mut self, on: bool) -> Self {
        self.parameterize = on;
        self
    }

    /// Sets whether NULL comparisons are dropped.
    #[must_use]
    pub const fn elide_nulls(mut self, on: bool) -> Self {
        self.elide_null_predicates = on;
        self
    }

    /// Sets keyword casing.
    #[must_use]
    pub const fn uppercase_keywords(mut self, on: bool) -> Self {
        self.uppercase_keywords = on;
        self
    }

    /// Sets identifier casing.
    #[must_use]
    pub const fn identifier_case(mut self, case: IdentifierCase) -> Self {
        self.identifier_case = case;
        self
    }

    /// Sets identifier quoting.
    #[must_use]
    pub const fn quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    /// Sets the handling of unparseable names.
    #[must_use]
    pub const fn name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    /// Starts connectives on their own line.
    #[must_use]
    pub const fn condition_on_newline(mut self, on: bool) -> Self {
        self.condition_on_newline = on;
        self
    }

    /// Sets the keyword column width.
    #[must_use]
    pub const fn pad_width(mut self, width: usize) -> Self {
        self.pad_width = width;
        self
    }

    /// Sets the starting indent level.
    #[must_use]
    pub const fn indent_level(mut self, level: usize) -> Self {
        self.indent_level = level;
        self
    }

    /// Sets the separator placed between clauses in pretty mode.
    #[must_use]
    pub fn line_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.line_delimiter = delimiter.into();
        self
    }

    /// Sets the chrono format used for dates.
    #[must_use]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the chrono format used for timestamps.
    #[must_use]
    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    /// Sets the chrono format used for times of day.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Sets the token used for null raw-expression arguments.
    #[must_use]
    pub fn expression_default(mut self, token: impl Into<String>) -> Self {
        self.expression_default = Some(token.into());
        self
    }
}

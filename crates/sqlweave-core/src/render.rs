//! Per-render-pass state.
//!
//! A [`RenderContext`] borrows the [`RenderOptions`] for one pass and owns the
//! values bound during that pass. Nested scopes (subqueries, WITH bodies) render
//! into a [`RenderContext::nested`] child and are folded back with
//! [`RenderContext::absorb`], so a child's indent or values never leak into a
//! sibling.

use crate::error::Result;
use crate::options::{IdentifierCase, RenderOptions};
use crate::value::SqlValue;

/// Connective between two operands of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Connective {
    /// Upper-case keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Mutable state of a single render pass.
#[derive(Debug)]
pub struct RenderContext<'a> {
    options: &'a RenderOptions,
    indent: usize,
    params: Vec<SqlValue>,
    param_offset: usize,
    aliases: Vec<String>,
}

impl<'a> RenderContext<'a> {
    /// Starts a render pass at the configured indent level.
    #[must_use]
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            indent: options.indent_level,
            params: vec![],
            param_offset: 0,
            aliases: vec![],
        }
    }

    /// The options of this pass.
    #[must_use]
    pub const fn options(&self) -> &'a RenderOptions {
        self.options
    }

    /// Current indent level.
    #[must_use]
    pub const fn indent_level(&self) -> usize {
        self.indent
    }

    /// Values bound so far, in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Consumes the context and returns the bound values.
    #[must_use]
    pub fn into_params(self) -> Vec<SqlValue> {
        self.params
    }

    /// A child scope one indent level deeper with an empty accumulator.
    ///
    /// Placeholder numbering continues after the values already bound here.
    #[must_use]
    pub fn nested(&self) -> Self {
        Self {
            indent: self.indent + 1,
            ..self.fork()
        }
    }

    /// A sibling scope at the same indent level with an empty accumulator.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            options: self.options,
            indent: self.indent,
            params: vec![],
            param_offset: self.param_offset + self.params.len(),
            aliases: vec![],
        }
    }

    /// Records a select-list alias of the statement rendered in this scope.
    pub fn declare_alias(&mut self, alias: &str) {
        self.aliases.push(String::from(alias));
    }

    /// Whether `name` is a select-list alias declared in this scope.
    ///
    /// Such names are written back exactly as declared.
    #[must_use]
    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias == name)
    }

    /// Appends the values of a finished child scope.
    pub fn absorb(&mut self, child: Self) {
        self.params.extend(child.params);
    }

    /// Renders `value` as a placeholder (recording the value) or as a literal.
    ///
    /// # Errors
    ///
    /// Propagates literal formatting failures.
    pub fn bind(&mut self, value: &SqlValue) -> Result<String> {
        if self.options.parameterize {
            self.params.push(value.clone());
            let position = self.param_offset + self.params.len();
            Ok(self.options.dialect.placeholder(position))
        } else {
            value.to_sql_literal(self.options)
        }
    }

    /// Applies keyword casing.
    #[must_use]
    pub fn keyword(&self, keyword: &str) -> String {
        if self.options.uppercase_keywords {
            keyword.to_uppercase()
        } else {
            keyword.to_lowercase()
        }
    }

    /// Applies identifier casing to an undelimited identifier.
    #[must_use]
    pub fn identifier(&self, ident: &str) -> String {
        match self.options.identifier_case {
            IdentifierCase::Upper => ident.to_uppercase(),
            IdentifierCase::Lower => ident.to_lowercase(),
            IdentifierCase::Preserve => String::from(ident),
        }
    }

    /// A clause keyword followed by its body separator.
    ///
    /// In pretty mode the keyword is right-padded so bodies line up after the
    /// widest keyword (`SELECT`).
    #[must_use]
    pub fn clause_keyword(&self, keyword: &str) -> String {
        let keyword = self.keyword(keyword);
        if self.options.pretty_print {
            let width = self.options.pad_width.saturating_sub(1);
            format!("{keyword:<width$} ")
        } else {
            format!("{keyword} ")
        }
    }

    /// Leading whitespace of the current indent level (pretty mode only).
    #[must_use]
    pub fn indent(&self) -> String {
        if self.options.pretty_print {
            " ".repeat(self.indent * self.options.pad_width)
        } else {
            String::new()
        }
    }

    /// Separator placed between two clauses.
    #[must_use]
    pub fn clause_separator(&self) -> String {
        if self.options.pretty_print {
            format!("{}{}", self.options.line_delimiter, self.indent())
        } else {
            String::from(" ")
        }
    }

    /// Separator placed before a connective and its right operand.
    #[must_use]
    pub fn connective(&self, connective: Connective) -> String {
        let keyword = self.keyword(connective.keyword());
        if self.options.condition_on_newline {
            let width = self.options.pad_width.saturating_sub(1);
            format!(
                "{}{}{keyword:<width$} ",
                self.options.line_delimiter,
                self.indent()
            )
        } else {
            format!(" {keyword} ")
        }
    }

    /// Wraps the text of a nested scope in parentheses.
    ///
    /// In pretty mode the nested text starts on its own line at the child's
    /// indent.
    #[must_use]
    pub fn parenthesize(&self, child: &Self, text: &str) -> String {
        if self.options.pretty_print {
            format!("({}{}{text})", self.options.line_delimiter, child.indent())
        } else {
            format!("({text})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn test_bind_literal_mode_records_nothing() {
        let opts = RenderOptions::default();
        let mut ctx = RenderContext::new(&opts);
        assert_eq!(ctx.bind(&SqlValue::Int(5)).unwrap(), "5");
        assert!(ctx.params().is_empty());
    }

    #[test]
    fn test_bind_parameterized_records_in_order() {
        let opts = RenderOptions::new().parameterized(true);
        let mut ctx = RenderContext::new(&opts);
        assert_eq!(ctx.bind(&SqlValue::Int(5)).unwrap(), "?");
        assert_eq!(ctx.bind(&SqlValue::Bool(true)).unwrap(), "?");
        assert_eq!(ctx.into_params(), vec![SqlValue::Int(5), SqlValue::Bool(true)]);
    }

    #[test]
    fn test_nested_never_shares_accumulator() {
        let opts = RenderOptions::new().parameterized(true);
        let mut parent = RenderContext::new(&opts);
        parent.bind(&SqlValue::Int(1)).unwrap();

        let mut child = parent.nested();
        assert!(child.params().is_empty());
        child.bind(&SqlValue::Int(2)).unwrap();
        assert_eq!(parent.params(), &[SqlValue::Int(1)]);

        parent.bind(&SqlValue::Int(3)).unwrap();
        assert_eq!(child.params(), &[SqlValue::Int(2)]);
        assert_eq!(child.indent_level(), parent.indent_level() + 1);
    }

    #[test]
    fn test_aliases_stay_in_their_scope() {
        let opts = RenderOptions::default();
        let mut parent = RenderContext::new(&opts);
        parent.declare_alias("n");
        assert!(parent.is_alias("n"));
        assert!(!parent.is_alias("N"));
        assert!(!parent.nested().is_alias("n"));
        assert!(!parent.fork().is_alias("n"));
    }

    #[test]
    fn test_fork_keeps_indent() {
        let opts = RenderOptions::new().indent_level(2);
        let ctx = RenderContext::new(&opts);
        assert_eq!(ctx.fork().indent_level(), 2);
        assert_eq!(ctx.nested().indent_level(), 3);
    }

    #[test]
    fn test_numbered_placeholders_continue_into_children() {
        let opts = RenderOptions::new()
            .parameterized(true)
            .dialect(Dialect::Postgres);
        let mut parent = RenderContext::new(&opts);
        assert_eq!(parent.bind(&SqlValue::Int(1)).unwrap(), "$1");
        let mut child = parent.nested();
        assert_eq!(child.bind(&SqlValue::Int(2)).unwrap(), "$2");
        parent.absorb(child);
        assert_eq!(parent.bind(&SqlValue::Int(3)).unwrap(), "$3");
        assert_eq!(parent.params().len(), 3);
    }

    #[test]
    fn test_clause_keyword_padding() {
        let plain = RenderOptions::default();
        assert_eq!(RenderContext::new(&plain).clause_keyword("from"), "FROM ");

        let pretty = RenderOptions::new().pretty(true);
        let ctx = RenderContext::new(&pretty);
        assert_eq!(ctx.clause_keyword("SELECT"), "SELECT ");
        assert_eq!(ctx.clause_keyword("FROM"), "FROM   ");
        assert_eq!(ctx.clause_keyword("GROUP BY"), "GROUP BY ");
    }

    #[test]
    fn test_connective_on_newline() {
        let opts = RenderOptions::new().condition_on_newline(true);
        let ctx = RenderContext::new(&opts);
        assert_eq!(ctx.connective(Connective::Or), "\nOR     ");
        let inline = RenderOptions::new().uppercase_keywords(false);
        assert_eq!(RenderContext::new(&inline).connective(Connective::And), " and ");
    }
}

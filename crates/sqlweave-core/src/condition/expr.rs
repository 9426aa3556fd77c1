//! Raw SQL fragments with positional `?` arguments.

use crate::error::{BuildError, Result};
use crate::render::RenderContext;
use crate::value::{SqlValue, ToSqlValue};

/// Creates a raw SQL fragment.
///
/// **Warning**: Only use this for SQL text that doesn't contain user input;
/// pass user input through [`RawExpr::bind`].
#[must_use]
pub fn raw(sql: impl Into<String>) -> RawExpr {
    RawExpr::new(sql)
}

/// Raw SQL text whose `?` slots are filled from positional arguments.
///
/// Slots inside single-quoted string literals are left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct RawExpr {
    sql: String,
    args: Vec<SqlValue>,
}

impl RawExpr {
    /// Creates a fragment without arguments.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: vec![],
        }
    }

    /// Creates a fragment with all its arguments.
    #[must_use]
    pub fn with_args(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Appends the next positional argument.
    #[must_use]
    pub fn bind<T: ToSqlValue>(mut self, value: T) -> Self {
        self.args.push(value.to_sql_value());
        self
    }

    /// The SQL text as written.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The positional arguments.
    #[must_use]
    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    fn malformed(&self, reason: String) -> BuildError {
        BuildError::MalformedExpression {
            sql: self.sql.clone(),
            reason,
        }
    }

    /// Substitutes every slot and returns the final text.
    ///
    /// A null argument becomes the configured
    /// [`expression_default`](crate::RenderOptions::expression_default) token.
    /// Without one, null arguments are only allowed at the tail, where they
    /// render as the NULL literal; a real argument after a null one would shift
    /// every later binding.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedExpression`] for a null argument followed
    /// by a real one (without a default token) or for more arguments than slots.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let default_token = ctx.options().expression_default.clone();
        if default_token.is_none() {
            if let Some(hole) = self.args.iter().position(SqlValue::is_null) {
                if let Some(offset) = self.args[hole..].iter().position(|a| !a.is_null()) {
                    return Err(self.malformed(format!(
                        "argument {} is null but argument {} is not",
                        hole + 1,
                        hole + offset + 1
                    )));
                }
            }
        }

        let mut out = String::with_capacity(self.sql.len());
        let mut in_literal = false;
        let mut slot = 0;
        for c in self.sql.chars() {
            match c {
                '\'' => {
                    in_literal = !in_literal;
                    out.push(c);
                }
                '?' if !in_literal => {
                    let filled = match self.args.get(slot) {
                        Some(value) if !value.is_null() => ctx.bind(value)?,
                        _ => match &default_token {
                            Some(token) => token.clone(),
                            None => SqlValue::Null.to_sql_literal(ctx.options())?,
                        },
                    };
                    out.push_str(&filled);
                    slot += 1;
                }
                _ => out.push(c),
            }
        }

        if self.args.len() > slot {
            return Err(self.malformed(format!(
                "{} arguments for {slot} placeholders",
                self.args.len()
            )));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;

    #[test]
    fn test_literal_substitution() {
        let opts = RenderOptions::default();
        let mut ctx = RenderContext::new(&opts);
        let expr = raw("price * ? + ?").bind(2).bind(0.5);
        assert_eq!(expr.render(&mut ctx).unwrap(), "price * 2 + 0.5");
    }

    #[test]
    fn test_parameterized_substitution() {
        let opts = RenderOptions::new().parameterized(true);
        let mut ctx = RenderContext::new(&opts);
        let expr = raw("lower(name) = ?").bind("bob");
        assert_eq!(expr.render(&mut ctx).unwrap(), "lower(name) = ?");
        assert_eq!(ctx.params(), &[SqlValue::Text(String::from("bob"))]);
    }

    #[test]
    fn test_question_mark_inside_literal_is_kept() {
        let opts = RenderOptions::default();
        let mut ctx = RenderContext::new(&opts);
        let expr = raw("note = 'why?' AND id = ?").bind(7);
        assert_eq!(expr.render(&mut ctx).unwrap(), "note = 'why?' AND id = 7");
    }

    #[test]
    fn test_trailing_null_renders_null_literal() {
        let opts = RenderOptions::new().parameterized(true);
        let mut ctx = RenderContext::new(&opts);
        let expr = raw("coalesce(?, ?)").bind(1).bind(SqlValue::Null);
        assert_eq!(expr.render(&mut ctx).unwrap(), "coalesce(?, NULL)");
        assert_eq!(ctx.params(), &[SqlValue::Int(1)]);
    }

    #[test]
    fn test_hole_without_default_is_malformed() {
        let opts = RenderOptions::default();
        let mut ctx = RenderContext::new(&opts);
        let expr = raw("f(?, ?)").bind(SqlValue::Null).bind(3);
        let err = expr.render(&mut ctx).unwrap_err();
        assert!(matches!(err, BuildError::MalformedExpression { .. }));
    }

    #[test]
    fn test_hole_with_default_token() {
        let opts = RenderOptions::new()
            .parameterized(true)
            .expression_default("DEFAULT");
        let mut ctx = RenderContext::new(&opts);
        let expr = raw("f(?, ?)").bind(SqlValue::Null).bind(3);
        assert_eq!(expr.render(&mut ctx).unwrap(), "f(DEFAULT, ?)");
        assert_eq!(ctx.params(), &[SqlValue::Int(3)]);
    }

    #[test]
    fn test_too_many_arguments() {
        let opts = RenderOptions::default();
        let mut ctx = RenderContext::new(&opts);
        let err = raw("a = ?").bind(1).bind(2).render(&mut ctx).unwrap_err();
        assert!(matches!(err, BuildError::MalformedExpression { reason, .. } if reason == "2 arguments for 1 placeholders"));
    }
}

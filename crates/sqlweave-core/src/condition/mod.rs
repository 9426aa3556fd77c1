//! Boolean condition trees for WHERE, ON, HAVING, START WITH and CONNECT BY.
//!
//! A [`Condition`] is a leading operand followed by `(connective, operand)`
//! pairs, so operands and connectives always alternate. Operands that render
//! to nothing (a predicate elided on NULL, an empty group) are skipped together
//! with one connective:
//!
//! ```text
//! A AND B(elided) OR C   =>   A AND C
//! B(elided) AND C        =>   C
//! ```

pub mod expr;
pub mod predicate;

pub use expr::{raw, RawExpr};
pub use predicate::{col, Column, Comparison, Operand, Operator, Predicate, Quantifier};

use tracing::trace;

use crate::builder::Query;
use crate::error::Result;
use crate::render::{Connective, RenderContext};

/// One operand of a condition.
#[derive(Debug, Clone)]
pub enum Term {
    /// A single comparison.
    Predicate(Predicate),
    /// A parenthesized sub-condition.
    Group(Box<Condition>),
    /// A raw boolean fragment.
    Raw(RawExpr),
    /// `[NOT ]EXISTS (subquery)`.
    Exists {
        /// Renders `NOT EXISTS`.
        negated: bool,
        /// The subquery.
        query: Query,
    },
}

impl Term {
    /// Renders the operand, or `None` when it contributes nothing.
    ///
    /// # Errors
    ///
    /// Propagates predicate, expression and subquery failures.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Option<String>> {
        match self {
            Self::Predicate(predicate) => predicate.render(ctx),
            Self::Group(group) => Ok(group.render(ctx)?.map(|inner| format!("({inner})"))),
            Self::Raw(expr) => {
                let text = expr.render(ctx)?;
                Ok(if text.trim().is_empty() { None } else { Some(text) })
            }
            Self::Exists { negated, query } => {
                let mut child = ctx.nested();
                let text = query.render_into(&mut child)?;
                let wrapped = ctx.parenthesize(&child, &text);
                ctx.absorb(child);
                let keyword = if *negated { "NOT EXISTS" } else { "EXISTS" };
                Ok(Some(format!("{} {wrapped}", ctx.keyword(keyword))))
            }
        }
    }
}

impl From<Predicate> for Term {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl From<Condition> for Term {
    fn from(condition: Condition) -> Self {
        Self::Group(Box::new(condition))
    }
}

impl From<RawExpr> for Term {
    fn from(expr: RawExpr) -> Self {
        Self::Raw(expr)
    }
}

/// `EXISTS (subquery)`.
#[must_use]
pub fn exists(query: Query) -> Term {
    Term::Exists {
        negated: false,
        query,
    }
}

/// `NOT EXISTS (subquery)`.
#[must_use]
pub fn not_exists(query: Query) -> Term {
    Term::Exists {
        negated: true,
        query,
    }
}

/// An AND/OR sequence of operands.
///
/// # Example
///
/// ```
/// use sqlweave_core::condition::{col, Condition};
/// use sqlweave_core::render::RenderContext;
/// use sqlweave_core::RenderOptions;
///
/// let cond = Condition::new()
///     .add(col("col1").eq(1))
///     .or()
///     .add(col("col2").eq(true));
///
/// let opts = RenderOptions::default();
/// let sql = cond.render(&mut RenderContext::new(&opts)).unwrap();
/// assert_eq!(sql.as_deref(), Some("COL1 = 1 OR COL2 = true"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Condition {
    first: Option<Term>,
    rest: Vec<(Connective, Term)>,
    pending: Option<Connective>,
}

impl Condition {
    /// Creates an empty condition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operand, joined with `AND` unless a connective is pending.
    pub fn push(&mut self, term: impl Into<Term>) {
        let term = term.into();
        if self.first.is_none() {
            self.first = Some(term);
        } else {
            let connective = self.pending.take().unwrap_or(Connective::And);
            self.rest.push((connective, term));
        }
    }

    /// Records the connective for the next operand.
    ///
    /// Ignored on an empty condition and when a connective is already pending.
    pub fn push_connective(&mut self, connective: Connective) {
        if self.first.is_some() && self.pending.is_none() {
            self.pending = Some(connective);
        }
    }

    /// Appends an operand.
    #[must_use]
    pub fn add(mut self, term: impl Into<Term>) -> Self {
        self.push(term);
        self
    }

    /// Joins the next operand with `AND`.
    #[must_use]
    pub fn and(mut self) -> Self {
        self.push_connective(Connective::And);
        self
    }

    /// Joins the next operand with `OR`.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.push_connective(Connective::Or);
        self
    }

    /// Returns `true` if no operand was added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Number of operands.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.first.is_some()) + self.rest.len()
    }

    /// Renders the condition, or `None` when every operand is absent.
    ///
    /// A pending connective is never rendered. Between two surviving operands
    /// the first connective that followed the earlier one is used.
    ///
    /// # Errors
    ///
    /// Propagates operand failures.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Option<String>> {
        let Some(first) = &self.first else {
            return Ok(None);
        };

        let mut out: Option<String> = None;
        let mut joiner: Option<Connective> = None;
        let pairs = self.rest.iter().map(|(connective, term)| (Some(*connective), term));
        for (connective, term) in std::iter::once((None, first)).chain(pairs) {
            if out.is_some() && joiner.is_none() {
                joiner = connective;
            }
            let Some(text) = term.render(ctx)? else {
                trace!("condition operand skipped");
                continue;
            };
            if let Some(sql) = out.as_mut() {
                sql.push_str(&ctx.connective(joiner.take().unwrap_or(Connective::And)));
                sql.push_str(&text);
            } else {
                out = Some(text);
            }
        }
        Ok(out)
    }
}

impl From<Predicate> for Condition {
    fn from(predicate: Predicate) -> Self {
        Self::new().add(predicate)
    }
}

impl From<RawExpr> for Condition {
    fn from(expr: RawExpr) -> Self {
        Self::new().add(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;
    use crate::value::SqlValue;

    fn literal(cond: &Condition) -> Option<String> {
        let opts = RenderOptions::default();
        cond.render(&mut RenderContext::new(&opts)).unwrap()
    }

    fn null() -> SqlValue {
        SqlValue::Null
    }

    #[test]
    fn test_round_trip_literal_and_parameterized() {
        let cond = Condition::new()
            .add(col("col1").eq(1))
            .or()
            .add(col("col2").eq(true));
        assert_eq!(literal(&cond).unwrap(), "COL1 = 1 OR COL2 = true");

        let opts = RenderOptions::new().parameterized(true);
        let mut ctx = RenderContext::new(&opts);
        assert_eq!(cond.render(&mut ctx).unwrap().unwrap(), "COL1 = ? OR COL2 = ?");
        assert_eq!(ctx.into_params(), vec![SqlValue::Int(1), SqlValue::Bool(true)]);
    }

    #[test]
    fn test_implicit_and() {
        let cond = Condition::new().add(col("a").eq(1)).add(col("b").eq(2));
        assert_eq!(literal(&cond).unwrap(), "A = 1 AND B = 2");
    }

    #[test]
    fn test_connective_rules() {
        let empty = Condition::new().or();
        assert!(empty.is_empty());
        assert_eq!(literal(&empty.add(col("a").eq(1))).unwrap(), "A = 1");

        let double = Condition::new().add(col("a").eq(1)).or().and().add(col("b").eq(2));
        assert_eq!(literal(&double).unwrap(), "A = 1 OR B = 2");

        let trailing = Condition::new().add(col("a").eq(1)).and();
        assert_eq!(literal(&trailing).unwrap(), "A = 1");
    }

    #[test]
    fn test_elided_middle_keeps_earlier_connective() {
        let cond = Condition::new()
            .add(col("a").eq(1))
            .and()
            .add(col("b").eq(null()))
            .or()
            .add(col("c").eq(3));
        assert_eq!(literal(&cond).unwrap(), "A = 1 AND C = 3");

        let swapped = Condition::new()
            .add(col("a").eq(1))
            .or()
            .add(col("b").eq(null()))
            .and()
            .add(col("c").eq(3));
        assert_eq!(literal(&swapped).unwrap(), "A = 1 OR C = 3");
    }

    #[test]
    fn test_elided_opening_operand() {
        let cond = Condition::new()
            .add(col("b").eq(null()))
            .and()
            .add(col("c").eq(3));
        assert_eq!(literal(&cond).unwrap(), "C = 3");
    }

    #[test]
    fn test_everything_elided_is_absent() {
        let cond = Condition::new()
            .add(col("a").eq(null()))
            .or()
            .add(col("b").not_eq(null()));
        assert_eq!(literal(&cond), None);
        assert_eq!(literal(&Condition::new()), None);
    }

    #[test]
    fn test_group_keeps_parentheses() {
        let group = Condition::new()
            .add(col("a").eq(1))
            .and()
            .add(col("b").eq(null()));
        let cond = Condition::new().add(group).or().add(col("c").eq(3));
        assert_eq!(literal(&cond).unwrap(), "(A = 1) OR C = 3");
    }

    #[test]
    fn test_empty_group_vanishes_with_its_connective() {
        let group = Condition::new()
            .add(col("a").eq(null()))
            .and()
            .add(col("b").eq(null()));
        let cond = Condition::new().add(col("c").eq(3)).or().add(group);
        assert_eq!(literal(&cond).unwrap(), "C = 3");

        let empty = Condition::new().add(Condition::new());
        assert_eq!(literal(&empty), None);
    }

    #[test]
    fn test_groups_nest_to_any_depth() {
        let innermost = Condition::new().add(col("x").eq(1)).or().add(col("y").eq(2));
        let middle = Condition::new().add(col("b").eq(0)).and().add(innermost);
        let outer = Condition::new().add(col("a").eq(0)).or().add(middle);
        assert!(matches!(Term::from(outer.clone()), Term::Group(_)));
        assert_eq!(literal(&outer).unwrap(), "A = 0 OR (B = 0 AND (X = 1 OR Y = 2))");
    }

    #[test]
    fn test_raw_operand() {
        let cond = Condition::new()
            .add(raw("a + b > ?").bind(10))
            .or()
            .add(raw(""));
        assert_eq!(literal(&cond).unwrap(), "a + b > 10");
    }

    #[test]
    fn test_promotion_when_elision_disabled() {
        let cond = Condition::new()
            .add(col("a").eq(1))
            .and()
            .add(col("b").eq(null()));
        let opts = RenderOptions::new().elide_nulls(false).parameterized(true);
        let mut ctx = RenderContext::new(&opts);
        assert_eq!(cond.render(&mut ctx).unwrap().unwrap(), "A = ? AND B IS NULL");
        assert_eq!(ctx.params().len(), 1);
    }

    #[test]
    fn test_conditions_on_new_lines() {
        let cond = Condition::new()
            .add(col("a").eq(1))
            .or()
            .add(col("b").eq(2));
        let opts = RenderOptions::new().condition_on_newline(true);
        let text = cond.render(&mut RenderContext::new(&opts)).unwrap().unwrap();
        assert_eq!(text, "A = 1\nOR     B = 2");
    }

    #[test]
    fn test_len_counts_operands() {
        let cond = Condition::from(col("a").eq(1)).or().add(col("b").eq(2));
        assert_eq!(cond.len(), 2);
    }
}

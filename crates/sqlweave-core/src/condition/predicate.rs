//! Single comparisons: `[NOT ]<name> <operator>[ <operand>]`.

use tracing::trace;

use super::expr::RawExpr;
use crate::builder::Query;
use crate::error::{BuildError, Result};
use crate::name::{self, NameRole};
use crate::render::RenderContext;
use crate::value::{SqlValue, ToSqlValue};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `LIKE`
    Like,
    /// `IN`
    In,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    IsNotNull,
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `<`
    Lt,
    /// `BETWEEN`
    Between,
}

impl Operator {
    /// The operator text; word operators are upper case.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::Ge => ">=",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Lt => "<",
            Self::Between => "BETWEEN",
        }
    }
}

/// Operators that compare against a single value, column, expression or
/// quantified subquery.
///
/// The list, range and `IS NULL` operators carry their own operand shape and
/// are only reachable through [`Column::in_list`], [`Column::between`] and
/// [`Column::is_null`]:
///
/// ```compile_fail
/// use sqlweave_core::{col, Operator};
///
/// let _ = col("a").compare(Operator::IsNull, 5);
/// ```
///
/// ```compile_fail
/// use sqlweave_core::{col, Operator, Select};
///
/// let _ = col("a").any(Operator::In, Select::new().from("t").build());
/// ```
///
/// ```compile_fail
/// use sqlweave_core::{col, raw, Operator};
///
/// let _ = col("a").compare_expr(Operator::Between, raw("1"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `LIKE`
    Like,
}

impl From<Comparison> for Operator {
    fn from(comparison: Comparison) -> Self {
        match comparison {
            Comparison::Eq => Self::Eq,
            Comparison::Ne => Self::Ne,
            Comparison::Lt => Self::Lt,
            Comparison::Le => Self::Le,
            Comparison::Gt => Self::Gt,
            Comparison::Ge => Self::Ge,
            Comparison::Like => Self::Like,
        }
    }
}

/// Quantifier placed in front of a subquery operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `ALL (...)`
    All,
    /// `ANY (...)`
    Any,
}

/// Right-hand side of a predicate.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A single value.
    Value(SqlValue),
    /// A value list, for `IN`.
    Values(Vec<SqlValue>),
    /// Lower and upper bound, for `BETWEEN`.
    Range(SqlValue, SqlValue),
    /// Another column.
    Column(String),
    /// A raw fragment with its own arguments.
    Expression(RawExpr),
    /// A subquery, optionally quantified.
    Subquery(Option<Quantifier>, Query),
    /// No right-hand side (`IS NULL` family).
    None,
}

impl Operand {
    /// Renders the operand, binding values into `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyRequiredSet`] for an empty value list and
    /// propagates name, expression and subquery failures.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self {
            Self::Value(value) => ctx.bind(value),
            Self::Values(values) => {
                if values.is_empty() {
                    return Err(BuildError::EmptyRequiredSet("IN list"));
                }
                let items = values
                    .iter()
                    .map(|v| ctx.bind(v))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", items.join(", ")))
            }
            Self::Range(low, high) => {
                let low = ctx.bind(low)?;
                let high = ctx.bind(high)?;
                Ok(format!("{low} {} {high}", ctx.keyword("AND")))
            }
            Self::Column(column) => name::resolve(column, ctx, NameRole::Reference),
            Self::Expression(expr) => expr.render(ctx),
            Self::Subquery(quantifier, query) => {
                let mut child = ctx.nested();
                let text = query.render_into(&mut child)?;
                let wrapped = ctx.parenthesize(&child, &text);
                ctx.absorb(child);
                Ok(match quantifier {
                    Some(Quantifier::All) => format!("{} {wrapped}", ctx.keyword("ALL")),
                    Some(Quantifier::Any) => format!("{} {wrapped}", ctx.keyword("ANY")),
                    None => wrapped,
                })
            }
            Self::None => Ok(String::new()),
        }
    }
}

/// One `name operator operand` comparison.
#[derive(Debug, Clone)]
pub struct Predicate {
    left: String,
    operator: Operator,
    negated: bool,
    operand: Operand,
}

impl Predicate {
    fn new(column: Column, operator: impl Into<Operator>, operand: Operand) -> Self {
        Self {
            left: column.name,
            operator: operator.into(),
            negated: column.negated,
            operand,
        }
    }

    /// Left-hand name as written.
    #[must_use]
    pub fn left(&self) -> &str {
        &self.left
    }

    /// The comparison operator as built.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// Whether the predicate is prefixed with `NOT`.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// The right-hand side.
    #[must_use]
    pub const fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Renders the predicate, or `None` when it is elided.
    ///
    /// A comparison against a NULL value is elided when
    /// [`elide_null_predicates`](crate::RenderOptions::elide_null_predicates) is
    /// set, and otherwise becomes `IS NULL` (`IS NOT NULL` for `!=`).
    ///
    /// # Errors
    ///
    /// Propagates operand and name failures.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Option<String>> {
        let mut operator = self.operator;
        let mut negated = self.negated;
        let null_value = matches!(self.operand, Operand::Value(SqlValue::Null));

        if null_value {
            if ctx.options().elide_null_predicates {
                trace!(column = %self.left, "eliding predicate on NULL value");
                return Ok(None);
            }
            operator = if operator == Operator::Ne {
                Operator::IsNotNull
            } else {
                Operator::IsNull
            };
        }

        // NOT on the IS NULL family folds into the operator.
        if negated {
            match operator {
                Operator::IsNull => {
                    operator = Operator::IsNotNull;
                    negated = false;
                }
                Operator::IsNotNull => {
                    operator = Operator::IsNull;
                    negated = false;
                }
                _ => {}
            }
        }

        let left = name::resolve(&self.left, ctx, NameRole::Reference)?;
        let mut text = String::new();
        if negated {
            text.push_str(&ctx.keyword("NOT"));
            text.push(' ');
        }
        text.push_str(&left);
        text.push(' ');
        text.push_str(&ctx.keyword(operator.as_str()));
        let rhs = if null_value {
            String::new()
        } else {
            self.operand.render(ctx)?
        };
        if !rhs.is_empty() {
            text.push(' ');
            text.push_str(&rhs);
        }
        Ok(Some(text))
    }
}

/// Creates a column reference to compare against.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        name: String::from(name),
        negated: false,
    }
}

/// Left-hand side of a predicate under construction.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    negated: bool,
}

impl Column {
    /// Prefixes the resulting predicate with `NOT`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub const fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Creates a single-value comparison.
    #[must_use]
    pub fn compare<T: ToSqlValue>(self, operator: Comparison, value: T) -> Predicate {
        Predicate::new(self, operator, Operand::Value(value.to_sql_value()))
    }

    /// Creates an equality predicate.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Predicate {
        self.compare(Comparison::Eq, value)
    }

    /// Creates an inequality predicate.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Predicate {
        self.compare(Comparison::Ne, value)
    }

    /// Creates a less-than predicate.
    #[must_use]
    pub fn lt<T: ToSqlValue>(self, value: T) -> Predicate {
        self.compare(Comparison::Lt, value)
    }

    /// Creates a less-than-or-equal predicate.
    #[must_use]
    pub fn lt_eq<T: ToSqlValue>(self, value: T) -> Predicate {
        self.compare(Comparison::Le, value)
    }

    /// Creates a greater-than predicate.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Predicate {
        self.compare(Comparison::Gt, value)
    }

    /// Creates a greater-than-or-equal predicate.
    #[must_use]
    pub fn gt_eq<T: ToSqlValue>(self, value: T) -> Predicate {
        self.compare(Comparison::Ge, value)
    }

    /// Creates a LIKE predicate.
    #[must_use]
    pub fn like<T: ToSqlValue>(self, pattern: T) -> Predicate {
        self.compare(Comparison::Like, pattern)
    }

    /// Creates a NOT LIKE predicate.
    #[must_use]
    pub fn not_like<T: ToSqlValue>(self, pattern: T) -> Predicate {
        self.not().like(pattern)
    }

    /// Creates an IS NULL predicate.
    #[must_use]
    pub fn is_null(self) -> Predicate {
        Predicate::new(self, Operator::IsNull, Operand::None)
    }

    /// Creates an IS NOT NULL predicate.
    #[must_use]
    pub fn is_not_null(self) -> Predicate {
        Predicate::new(self, Operator::IsNotNull, Operand::None)
    }

    /// Creates a BETWEEN predicate.
    #[must_use]
    pub fn between<T: ToSqlValue, U: ToSqlValue>(self, low: T, high: U) -> Predicate {
        Predicate::new(
            self,
            Operator::Between,
            Operand::Range(low.to_sql_value(), high.to_sql_value()),
        )
    }

    /// Creates a NOT BETWEEN predicate.
    #[must_use]
    pub fn not_between<T: ToSqlValue, U: ToSqlValue>(self, low: T, high: U) -> Predicate {
        self.not().between(low, high)
    }

    /// Creates an IN predicate; an empty list fails at render time.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Predicate {
        let values = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        Predicate::new(self, Operator::In, Operand::Values(values))
    }

    /// Creates a NOT IN predicate.
    #[must_use]
    pub fn not_in_list<T: ToSqlValue>(self, values: Vec<T>) -> Predicate {
        self.not().in_list(values)
    }

    /// Creates an `IN (subquery)` predicate.
    #[must_use]
    pub fn in_query(self, query: Query) -> Predicate {
        Predicate::new(self, Operator::In, Operand::Subquery(None, query))
    }

    /// Compares against another column.
    #[must_use]
    pub fn compare_column(self, operator: Comparison, other: &str) -> Predicate {
        Predicate::new(self, operator, Operand::Column(String::from(other)))
    }

    /// Column equality, e.g. a join condition.
    #[must_use]
    pub fn eq_column(self, other: &str) -> Predicate {
        self.compare_column(Comparison::Eq, other)
    }

    /// Compares against a raw expression.
    #[must_use]
    pub fn compare_expr(self, operator: Comparison, expr: RawExpr) -> Predicate {
        Predicate::new(self, operator, Operand::Expression(expr))
    }

    /// Equality against a raw expression.
    #[must_use]
    pub fn eq_expr(self, expr: RawExpr) -> Predicate {
        self.compare_expr(Comparison::Eq, expr)
    }

    /// Compares against every row of a subquery: `op ALL (...)`.
    #[must_use]
    pub fn all(self, operator: Comparison, query: Query) -> Predicate {
        Predicate::new(self, operator, Operand::Subquery(Some(Quantifier::All), query))
    }

    /// Compares against any row of a subquery: `op ANY (...)`.
    #[must_use]
    pub fn any(self, operator: Comparison, query: Query) -> Predicate {
        Predicate::new(self, operator, Operand::Subquery(Some(Quantifier::Any), query))
    }
}

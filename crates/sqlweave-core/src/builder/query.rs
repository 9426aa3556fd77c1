//! Finished statements and their render entry points.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::chain::Node;
use crate::error::Result;
use crate::options::RenderOptions;
use crate::render::RenderContext;
use crate::value::SqlValue;

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Statement text.
    pub sql: String,
    /// Bound values in placeholder order; empty in literal mode.
    pub params: Vec<SqlValue>,
}

/// Hook applied to a statement after rendering.
pub trait PostProcessor: Send + Sync {
    /// Rewrites the rendered text.
    fn transform_sql(&self, sql: String, options: &RenderOptions) -> String;

    /// Rewrites the whole rendered statement. Defaults to
    /// [`transform_sql`](Self::transform_sql) on the text only.
    fn transform_statement(&self, rendered: Rendered, options: &RenderOptions) -> Rendered {
        Rendered {
            sql: self.transform_sql(rendered.sql, options),
            params: rendered.params,
        }
    }
}

impl<F> PostProcessor for F
where
    F: Fn(String, &RenderOptions) -> String + Send + Sync,
{
    fn transform_sql(&self, sql: String, options: &RenderOptions) -> String {
        self(sql, options)
    }
}

/// A complete statement, ready to render.
///
/// Cloning is cheap; the clauses are shared.
///
/// # Example
///
/// ```
/// use sqlweave_core::{col, RenderOptions, Select, SqlValue};
///
/// let query = Select::new()
///     .columns(&["id", "name"])
///     .from("users")
///     .where_clause(col("active").eq(true))
///     .build();
///
/// let (sql, params) = query.to_parameterized(&RenderOptions::default()).unwrap();
/// assert_eq!(sql, "SELECT ID, NAME FROM USERS WHERE ACTIVE = ?");
/// assert_eq!(params, vec![SqlValue::Bool(true)]);
/// ```
#[derive(Clone)]
pub struct Query {
    tail: Arc<Node>,
    post: Option<Arc<dyn PostProcessor>>,
}

impl Query {
    pub(crate) const fn new(tail: Arc<Node>) -> Self {
        Self { tail, post: None }
    }

    /// Installs a hook that rewrites the rendered statement.
    ///
    /// The hook only runs when this query is rendered on its own, not when it
    /// is embedded as a subquery.
    #[must_use]
    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post = Some(Arc::new(processor));
        self
    }

    /// Renders the clause chain into an existing context.
    ///
    /// # Errors
    ///
    /// Propagates any clause failure.
    pub fn render_into(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        self.tail.render(ctx)
    }

    /// Runs one render pass with `options` as given.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuildError`](crate::BuildError) met while rendering.
    pub fn render(&self, options: &RenderOptions) -> Result<Rendered> {
        let mut ctx = RenderContext::new(options);
        let indent = ctx.indent();
        let body = self.render_into(&mut ctx)?;
        let rendered = Rendered {
            sql: format!("{indent}{body}"),
            params: ctx.into_params(),
        };
        debug!(
            dialect = options.dialect.name(),
            params = rendered.params.len(),
            "rendered statement"
        );
        Ok(match &self.post {
            Some(post) => post.transform_statement(rendered, options),
            None => rendered,
        })
    }

    /// Renders with every value inlined as a literal.
    ///
    /// # Errors
    ///
    /// See [`Query::render`].
    pub fn to_sql(&self, options: &RenderOptions) -> Result<String> {
        let options = options.clone().parameterized(false);
        Ok(self.render(&options)?.sql)
    }

    /// Renders with placeholders and returns the values in placeholder order.
    ///
    /// # Errors
    ///
    /// See [`Query::render`].
    pub fn to_parameterized(&self, options: &RenderOptions) -> Result<(String, Vec<SqlValue>)> {
        let options = options.clone().parameterized(true);
        let rendered = self.render(&options)?;
        Ok((rendered.sql, rendered.params))
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("tail", &self.tail)
            .field("post_processor", &self.post.is_some())
            .finish()
    }
}

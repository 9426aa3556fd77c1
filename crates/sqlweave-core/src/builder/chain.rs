//! Immutable clause nodes.
//!
//! Every stage seals its clause into a [`Node`] that points at the node before
//! it. Rendering walks back to the root first, so clauses (and bound values)
//! come out in statement order. Nodes are never mutated once sealed, so a prefix
//! can be shared by several statements.

use std::sync::Arc;

use super::query::Query;
use crate::condition::{Condition, RawExpr};
use crate::error::{BuildError, Result};
use crate::name::{self, NameRole};
use crate::render::RenderContext;
use crate::value::SqlValue;

/// Join flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
    /// `FULL JOIN`
    Full,
    /// `CROSS JOIN`
    Cross,
}

impl JoinKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Column name as written, without the direction.
    pub column: String,
    /// Explicit direction, if any.
    pub direction: Option<Direction>,
}

impl OrderItem {
    /// Parses `name [ASC|DESC]`; the direction word is case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some((head, tail)) = trimmed.rsplit_once(char::is_whitespace) {
            let direction = if tail.eq_ignore_ascii_case("asc") {
                Some(Direction::Asc)
            } else if tail.eq_ignore_ascii_case("desc") {
                Some(Direction::Desc)
            } else {
                None
            };
            if direction.is_some() {
                return Self {
                    column: String::from(head.trim_end()),
                    direction,
                };
            }
        }
        Self {
            column: String::from(trimmed),
            direction: None,
        }
    }

    /// Descending entry for `column`.
    #[must_use]
    pub fn desc(column: &str) -> Self {
        Self {
            column: String::from(column),
            direction: Some(Direction::Desc),
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let column = grouping_term(&self.column, ctx)?;
        Ok(match self.direction {
            Some(Direction::Asc) => format!("{column} {}", ctx.keyword("ASC")),
            Some(Direction::Desc) => format!("{column} {}", ctx.keyword("DESC")),
            None => column,
        })
    }
}

/// Right-hand side of a SET assignment or a VALUES entry.
#[derive(Debug, Clone)]
pub enum SetValue {
    /// A bound or inlined value.
    Value(SqlValue),
    /// A raw expression such as `counter + 1`.
    Expr(RawExpr),
}

impl SetValue {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self {
            Self::Value(value) => ctx.bind(value),
            Self::Expr(expr) => expr.render(ctx),
        }
    }
}

/// One SQL keyword section.
#[derive(Debug, Clone)]
pub(crate) enum Clause {
    With {
        recursive: bool,
        ctes: Vec<(String, Query)>,
    },
    Select {
        distinct: bool,
        columns: Vec<String>,
    },
    From(Vec<String>),
    Join {
        kind: JoinKind,
        table: String,
        on: Condition,
    },
    Where(Condition),
    StartWith(Condition),
    ConnectBy(Condition),
    GroupBy(Vec<String>),
    Having(Condition),
    OrderBy(Vec<OrderItem>),
    Union {
        all: bool,
        query: Query,
    },
    InsertInto {
        table: String,
        columns: Vec<String>,
    },
    Values {
        width: Option<usize>,
        rows: Vec<Vec<SetValue>>,
    },
    Source(Query),
    Update(String),
    Set(Vec<(String, SetValue)>),
    DeleteFrom(String),
}

fn name_list(names: &[String], ctx: &RenderContext<'_>, role: NameRole) -> Result<String> {
    let resolved = names
        .iter()
        .map(|n| name::resolve(n, ctx, role))
        .collect::<Result<Vec<_>>>()?;
    Ok(resolved.join(", "))
}

// GROUP BY and ORDER BY may name a select-list alias, which was written verbatim.
fn grouping_term(raw: &str, ctx: &RenderContext<'_>) -> Result<String> {
    let trimmed = raw.trim();
    if ctx.is_alias(trimmed) {
        Ok(String::from(trimmed))
    } else {
        name::resolve(raw, ctx, NameRole::Reference)
    }
}

fn filter(keyword: &str, condition: &Condition, ctx: &mut RenderContext<'_>) -> Result<Option<String>> {
    let keyword = ctx.clause_keyword(keyword);
    Ok(condition.render(ctx)?.map(|body| format!("{keyword}{body}")))
}

impl Clause {
    /// Renders this clause alone; `None` means the clause is absent.
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<Option<String>> {
        let text = match self {
            Self::With { recursive, ctes } => {
                let mut parts = Vec::with_capacity(ctes.len());
                for (cte, query) in ctes {
                    let cte = name::resolve(cte, ctx, NameRole::Reference)?;
                    let mut child = ctx.nested();
                    let body = query.render_into(&mut child)?;
                    let body = ctx.parenthesize(&child, &body);
                    ctx.absorb(child);
                    parts.push(format!("{cte} {} {body}", ctx.keyword("AS")));
                }
                let keyword = if *recursive { "WITH RECURSIVE" } else { "WITH" };
                format!("{}{}", ctx.clause_keyword(keyword), parts.join(", "))
            }
            Self::Select { distinct, columns } => {
                let mut text = ctx.clause_keyword("SELECT");
                if *distinct {
                    text.push_str(&ctx.keyword("DISTINCT"));
                    text.push(' ');
                }
                if columns.is_empty() {
                    text.push('*');
                } else {
                    text.push_str(&name_list(columns, ctx, NameRole::Column)?);
                    for alias in columns.iter().filter_map(|c| name::Name::parse(c)?.alias) {
                        ctx.declare_alias(&alias);
                    }
                }
                text
            }
            Self::From(tables) => format!(
                "{}{}",
                ctx.clause_keyword("FROM"),
                name_list(tables, ctx, NameRole::Table)?
            ),
            Self::Join { kind, table, on } => {
                let mut text = format!(
                    "{}{}",
                    ctx.clause_keyword(kind.keyword()),
                    name::resolve(table, ctx, NameRole::Table)?
                );
                if let Some(on) = on.render(ctx)? {
                    text.push(' ');
                    text.push_str(&ctx.keyword("ON"));
                    text.push(' ');
                    text.push_str(&on);
                }
                text
            }
            Self::Where(condition) => return filter("WHERE", condition, ctx),
            Self::StartWith(condition) => return filter("START WITH", condition, ctx),
            Self::ConnectBy(condition) => return filter("CONNECT BY", condition, ctx),
            Self::Having(condition) => return filter("HAVING", condition, ctx),
            Self::GroupBy(columns) => {
                if columns.is_empty() {
                    return Ok(None);
                }
                let columns = columns
                    .iter()
                    .map(|column| grouping_term(column, ctx))
                    .collect::<Result<Vec<_>>>()?;
                format!("{}{}", ctx.clause_keyword("GROUP BY"), columns.join(", "))
            }
            Self::OrderBy(items) => {
                if items.is_empty() {
                    return Ok(None);
                }
                let items = items
                    .iter()
                    .map(|item| item.render(ctx))
                    .collect::<Result<Vec<_>>>()?;
                format!("{}{}", ctx.clause_keyword("ORDER BY"), items.join(", "))
            }
            Self::Union { all, query } => {
                let keyword = if *all { "UNION ALL" } else { "UNION" };
                let keyword = ctx.keyword(keyword);
                let separator = ctx.clause_separator();
                format!("{keyword}{separator}{}", query.render_into(ctx)?)
            }
            Self::InsertInto { table, columns } => {
                let mut text = format!(
                    "{}{}",
                    ctx.clause_keyword("INSERT INTO"),
                    name::resolve(table, ctx, NameRole::Table)?
                );
                if !columns.is_empty() {
                    text.push_str(&format!(" ({})", name_list(columns, ctx, NameRole::Reference)?));
                }
                text
            }
            Self::Values { width, rows } => {
                if rows.is_empty() {
                    return Err(BuildError::EmptyRequiredSet("VALUES rows"));
                }
                let expected = width.unwrap_or(rows[0].len());
                let mut rendered = Vec::with_capacity(rows.len());
                for row in rows {
                    if row.is_empty() {
                        return Err(BuildError::EmptyRequiredSet("VALUES row"));
                    }
                    if row.len() != expected {
                        return Err(BuildError::ValueCountMismatch {
                            expected,
                            found: row.len(),
                        });
                    }
                    let values = row
                        .iter()
                        .map(|value| value.render(ctx))
                        .collect::<Result<Vec<_>>>()?;
                    rendered.push(format!("({})", values.join(", ")));
                }
                format!("{}{}", ctx.clause_keyword("VALUES"), rendered.join(", "))
            }
            Self::Source(query) => query.render_into(ctx)?,
            Self::Update(table) => format!(
                "{}{}",
                ctx.clause_keyword("UPDATE"),
                name::resolve(table, ctx, NameRole::Table)?
            ),
            Self::Set(assignments) => {
                if assignments.is_empty() {
                    return Err(BuildError::EmptyRequiredSet("SET assignments"));
                }
                let mut parts = Vec::with_capacity(assignments.len());
                for (column, value) in assignments {
                    let column = name::resolve(column, ctx, NameRole::Reference)?;
                    parts.push(format!("{column} = {}", value.render(ctx)?));
                }
                format!("{}{}", ctx.clause_keyword("SET"), parts.join(", "))
            }
            Self::DeleteFrom(table) => format!(
                "{}{}",
                ctx.clause_keyword("DELETE FROM"),
                name::resolve(table, ctx, NameRole::Table)?
            ),
        };
        Ok(Some(text))
    }
}

/// A sealed clause and the clause before it.
#[derive(Debug)]
pub(crate) struct Node {
    clause: Clause,
    prev: Option<Arc<Node>>,
}

impl Node {
    pub(crate) fn seal(clause: Clause, prev: Option<Arc<Self>>) -> Arc<Self> {
        Arc::new(Self { clause, prev })
    }

    /// Renders the whole chain ending at this node.
    pub(crate) fn render(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        let head = match &self.prev {
            Some(prev) => prev.render(ctx)?,
            None => String::new(),
        };
        Ok(match self.clause.render(ctx)? {
            Some(own) if head.is_empty() => own,
            Some(own) => format!("{head}{}{own}", ctx.clause_separator()),
            None => head,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_shorthand() {
        let item = OrderItem::parse("created_at desc");
        assert_eq!(item.column, "created_at");
        assert_eq!(item.direction, Some(Direction::Desc));

        let item = OrderItem::parse("  name ASC ");
        assert_eq!(item.column, "name");
        assert_eq!(item.direction, Some(Direction::Asc));

        let item = OrderItem::parse("descending");
        assert_eq!(item.column, "descending");
        assert_eq!(item.direction, None);
    }

    #[test]
    fn test_absent_clause_leaves_no_separator() {
        use crate::options::RenderOptions;

        let root = Node::seal(Clause::From(vec![String::from("t")]), None);
        let tail = Node::seal(Clause::GroupBy(vec![]), Some(root));
        let opts = RenderOptions::default();
        assert_eq!(tail.render(&mut RenderContext::new(&opts)).unwrap(), "FROM T");
    }
}

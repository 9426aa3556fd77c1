//! Name resolution.
//!
//! Column and table names are written as plain strings:
//!
//! ```text
//! [function(] [schema.][table.]name [)] [[AS] alias]
//! ```
//!
//! A name is split into its parts, then written back with the active casing
//! and quoting rules. Names outside that grammar (arithmetic, literals,
//! `COUNT(DISTINCT x)`, ...) follow the configured [`NamePolicy`].

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{BuildError, Result};
use crate::options::{NamePolicy, QuotePolicy};
use crate::render::RenderContext;

const IDENT: &str = r#"[A-Za-z_][A-Za-z0-9_$#]*|"[^"]+"|`[^`]+`|\[[^\]]+\]"#;

fn name_regex() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| {
        let pattern = format!(
            r"^\s*(?:(?P<func>[A-Za-z_][A-Za-z0-9_]*)\s*\(\s*)?(?:(?P<first>{IDENT})\s*\.\s*)?(?:(?P<second>{IDENT})\s*\.\s*)?(?P<base>{IDENT}|\*)\s*(?P<close>\))?(?:\s+(?:(?i:AS)\s+)?(?P<alias>{IDENT}))?\s*$"
        );
        Regex::new(&pattern).expect("name pattern is a valid regex")
    })
}

fn identifier(caps: &Captures<'_>, group: &str) -> Option<Identifier> {
    caps.name(group).map(|m| Identifier::parse(m.as_str()))
}

/// Where a resolved name is placed, which decides how an alias is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    /// Select-list entry: `expr [AS] alias`.
    Column,
    /// FROM / JOIN entry: `table [AS] alias`.
    Table,
    /// Any other position; aliases are not allowed.
    Reference,
}

/// One identifier part of a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Identifier text without delimiters.
    pub value: String,
    /// Opening and closing delimiter when the identifier was written delimited.
    pub delimiters: Option<(char, char)>,
}

impl Identifier {
    fn parse(raw: &str) -> Self {
        let mut chars = raw.chars();
        let delimiters = match (chars.next(), chars.next_back()) {
            (Some('"'), Some('"')) => Some(('"', '"')),
            (Some('`'), Some('`')) => Some(('`', '`')),
            (Some('['), Some(']')) => Some(('[', ']')),
            _ => None,
        };
        let value = if delimiters.is_some() {
            String::from(&raw[1..raw.len() - 1])
        } else {
            String::from(raw)
        };
        Self { value, delimiters }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        if self.value == "*" {
            return self.value.clone();
        }
        let options = ctx.options();
        let text = match self.delimiters {
            Some(_) => self.value.clone(),
            None => ctx.identifier(&self.value),
        };
        match (options.quote_policy, self.delimiters) {
            (QuotePolicy::Always, _) => options.dialect.quote_identifier(&text),
            (QuotePolicy::Preserve, Some((open, close))) => format!("{open}{text}{close}"),
            (QuotePolicy::Preserve, None) | (QuotePolicy::Never, _) => text,
        }
    }
}

/// A structured name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Function wrapping the qualified reference, e.g. `count`.
    pub function: Option<String>,
    /// Schema qualifier.
    pub schema: Option<Identifier>,
    /// Table qualifier.
    pub table: Option<Identifier>,
    /// Base name; `*` is allowed.
    pub base: Identifier,
    /// Alias, appended verbatim.
    pub alias: Option<String>,
}

impl Name {
    /// Parses a raw name, returning `None` when it is outside the grammar.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = name_regex().captures(raw)?;
        // A function wrapper needs its closing parenthesis and vice versa.
        if caps.name("func").is_some() != caps.name("close").is_some() {
            return None;
        }
        let (schema, table) = match (identifier(&caps, "first"), identifier(&caps, "second")) {
            (Some(schema), Some(table)) => (Some(schema), Some(table)),
            (Some(table), None) => (None, Some(table)),
            (None, _) => (None, None),
        };
        Some(Self {
            function: caps.name("func").map(|m| String::from(m.as_str())),
            schema,
            table,
            base: Identifier::parse(caps.name("base")?.as_str()),
            alias: caps.name("alias").map(|m| String::from(m.as_str())),
        })
    }

    /// The qualified reference with its function wrapper, without alias.
    #[must_use]
    pub fn qualified(&self, ctx: &RenderContext<'_>) -> String {
        let parts: Vec<String> = [self.schema.as_ref(), self.table.as_ref(), Some(&self.base)]
            .into_iter()
            .flatten()
            .map(|ident| ident.render(ctx))
            .collect();
        let reference = parts.join(".");
        match &self.function {
            Some(function) => format!("{}({reference})", ctx.keyword(function)),
            None => reference,
        }
    }

    /// Writes the name back for the given role.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext<'_>, role: NameRole) -> String {
        let qualified = self.qualified(ctx);
        let options = ctx.options();
        let with_as = match role {
            NameRole::Column => options.column_alias_as,
            NameRole::Table => options.table_alias_as,
            NameRole::Reference => false,
        };
        match &self.alias {
            Some(alias) if with_as => format!("{qualified} {} {alias}", ctx.keyword("AS")),
            Some(alias) => format!("{qualified} {alias}"),
            None => qualified,
        }
    }
}

/// Resolves a raw name under the context's formatting rules.
///
/// # Errors
///
/// Returns [`BuildError::UnrecognizableName`] when the name is outside the
/// grammar (or carries an alias where none is allowed) and the policy is
/// [`NamePolicy::Reject`].
pub fn resolve(raw: &str, ctx: &RenderContext<'_>, role: NameRole) -> Result<String> {
    match Name::parse(raw) {
        Some(name) if !(role == NameRole::Reference && name.alias.is_some()) => Ok(name.render(ctx, role)),
        _ => match ctx.options().name_policy {
            NamePolicy::PassThrough => {
                debug!(name = raw, "passing unrecognized name through");
                Ok(String::from(raw.trim()))
            }
            NamePolicy::Reject => Err(BuildError::UnrecognizableName(String::from(raw))),
        },
    }
}

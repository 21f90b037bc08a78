//! CSS and PCSS scanners.
//!
//! Plain stylesheets declare `@import` files and `url(...)` references.
//! Local references are normalized against the stylesheet's directory;
//! references with a scheme become `css:url` items and `data:` URIs are
//! ignored.
//! Preprocessed stylesheets add `@module` names, `@include` files, and
//! `@import`/`@use` of modules; their `url(...)` references may be template
//! expressions (backquotes with `$`), which are skipped.

use std::sync::LazyLock;

use super::rules::{RuleTable, group, unquote};
use super::{Collected, LineParser, ParseContext};
use crate::core::{DeparseError, Item, kinds};
use crate::utils::relative_to_source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Module,
    Include,
    Import,
    ImportModule,
    Url,
}

/// Plain CSS, tried in this order.
const CSS_RULES: &[(Rule, &str)] = &[(Rule::Import, r"@import\s+(.+)"), (Rule::Url, r".*url\(([^)]+)\)")];

/// PCSS, tried in this order.
const PCSS_RULES: &[(Rule, &str)] = &[
    (Rule::Module, r"@module\s+(\S+)"),
    (Rule::Include, r"@include\s+(\S+)"),
    (Rule::ImportModule, r"@(?:import|use)\s+(.+)"),
    (Rule::Url, r".*url\(([^)]+)\)"),
];

static CSS_TABLE: LazyLock<RuleTable<Rule>> = LazyLock::new(|| RuleTable::new(CSS_RULES));
static PCSS_TABLE: LazyLock<RuleTable<Rule>> = LazyLock::new(|| RuleTable::new(PCSS_RULES));

#[derive(Debug)]
pub struct StylesheetScanner {
    preprocessed: bool,
}

impl StylesheetScanner {
    pub fn plain() -> Self {
        Self {
            preprocessed: false,
        }
    }

    pub fn preprocessed() -> Self {
        Self {
            preprocessed: true,
        }
    }

    fn table(&self) -> &'static RuleTable<Rule> {
        if self.preprocessed { &PCSS_TABLE } else { &CSS_TABLE }
    }
}

/// Trims a declaration value and its trailing `;`, then unquotes it.
fn declaration_value(raw: &str) -> &str {
    unquote(raw.trim().trim_end_matches(';').trim_end())
}

/// The argument of a `url(...)` value, unquoted.
fn url_argument(value: &str) -> Option<&str> {
    let (_, rest) = value.split_once("url(")?;
    let inner = rest.split_once(')').map_or(rest, |(inner, _)| inner);
    Some(unquote(inner.trim()))
}

fn url_reference(raw: &str, ctx: &ParseContext<'_>, out: &mut Collected) {
    let url = unquote(raw.trim());
    if url.is_empty() || url.starts_with("data:") {
        return;
    }
    let url = url.strip_prefix("file://").unwrap_or(url);
    if url.contains("://") {
        out.require(Item::new(kinds::CSS_URL, url));
        return;
    }
    let local = url.split(['?', '#']).next().unwrap_or(url);
    let path = relative_to_source(ctx.path, local);
    out.require(Item::new(kinds::ANY_FILE, path.to_string_lossy()));
}

impl LineParser for StylesheetScanner {
    fn parse_line(
        &mut self,
        line: &str,
        ctx: &ParseContext<'_>,
        out: &mut Collected,
    ) -> Result<(), DeparseError> {
        let Some((rule, caps)) = self.table().first_match(line) else {
            return Ok(());
        };
        let captured = group(&caps, 1);
        match rule {
            Rule::Module => out.provide(Item::new(kinds::PCSS_MODULE, captured)),
            Rule::Include => {
                let path = relative_to_source(ctx.path, captured.trim());
                out.require(Item::new(kinds::PCSS_FILE, path.to_string_lossy()));
            }
            Rule::Import => {
                let value = declaration_value(captured);
                let value = url_argument(value).unwrap_or(value);
                if value.contains("://") {
                    out.require(Item::new(kinds::CSS_URL, value));
                } else {
                    let path = relative_to_source(ctx.path, value);
                    out.require(Item::new(kinds::CSS_FILE, path.to_string_lossy()));
                }
            }
            Rule::ImportModule => {
                let value = declaration_value(captured);
                if let Some(inner) = url_argument(value) {
                    out.require(Item::new(kinds::CSS_FILE, inner));
                } else {
                    out.require(Item::new(kinds::CSS_MODULE, value));
                }
            }
            Rule::Url => {
                if !(self.preprocessed && captured.contains('`') && captured.contains('$')) {
                    url_reference(captured, ctx, out);
                }
            }
        }
        Ok(())
    }
}

//! PAML template scanner.
//!
//! PAML is an indentation-based markup language. Dependencies appear as tag
//! attributes (`<link(rel="stylesheet", href="theme.css")`), as `@require`
//! directives, as `%include` lines and as `data-component` attributes.
//!
//! A `<script` line opens an embedded scanner for the script body: lines
//! indented deeper than the `<script` line are forwarded with their leading
//! tabs stripped to a module scanner, or to a Sugar scanner for
//! `<script@sugar`. The embedded scanner writes into the same output lists
//! as the template. The first non-blank line at or above the script's
//! indentation, or the end of the file, closes it. Host rules still run on
//! every line.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::module::ModuleScanner;
use super::rules::{RuleTable, between, group, indentation, unquote};
use super::sugar::SugarScanner;
use super::{Collected, LineParser, ParseContext};
use crate::constants::TEMPLATE_EXPRESSION_MARKER;
use crate::core::{DeparseError, Item, kinds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Link,
    ImportPragma,
    ScriptTag,
    RequireScript,
    RequireGModule,
    RequireModule,
    RequireStylesheet,
    DataComponent,
    Include,
    JsxImport,
}

/// Tried in this order; the first match wins.
const RULES: &[(Rule, &str)] = &[
    (Rule::Link, r"\t+<link\("),
    (Rule::ImportPragma, r"\s*#\s*@import\s*([\w.-]+)(?:!(\w+))?"),
    (Rule::ScriptTag, r"\t+<script\("),
    (Rule::RequireScript, r"\t+@(?:import|require):js\("),
    (Rule::RequireGModule, r"\t+@(?:import|require):gmodule\("),
    (Rule::RequireModule, r"\t+@(?:import|require):module\("),
    (Rule::RequireStylesheet, r"\t+@(?:import|require):css\("),
    (Rule::DataComponent, r"\t.*[,(]data-component=([^,)]+)"),
    (Rule::Include, r"\t+%include\s*"),
    (Rule::JsxImport, r"\t*<jsx::import\(([^)]+)\)$"),
];

static TABLE: LazyLock<RuleTable<Rule>> = LazyLock::new(|| RuleTable::new(RULES));

static SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\t*)<script(?:@(\w+))?").unwrap_or_else(|e| panic!("invalid script pattern: {e}"))
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(\??(?:[\w-]+::)?[\w-]+)(?:=('[^']+'|"[^"]+"|[^),]+))?"#)
        .unwrap_or_else(|e| panic!("invalid attribute pattern: {e}"))
});

/// Whether lines are read by the template or forwarded to a script scanner.
enum Embedding {
    Host,
    Embedded {
        /// Tab depth of the `<script` line.
        indent: usize,
        inner: Box<dyn LineParser>,
    },
}

pub struct MarkupScanner {
    state: Embedding,
}

impl MarkupScanner {
    pub fn new() -> Self {
        Self {
            state: Embedding::Host,
        }
    }

    /// Whether a script body is currently being forwarded.
    pub fn is_embedded(&self) -> bool {
        matches!(self.state, Embedding::Embedded { .. })
    }

    fn detach(&mut self, ctx: &ParseContext<'_>, out: &mut Collected) -> Result<(), DeparseError> {
        if let Embedding::Embedded {
            mut inner,
            ..
        } = std::mem::replace(&mut self.state, Embedding::Host)
        {
            inner.finish(ctx, out)?;
        }
        Ok(())
    }

    fn host_line(&mut self, line: &str, ctx: &ParseContext<'_>, out: &mut Collected) -> Result<(), DeparseError> {
        let Some((rule, caps)) = TABLE.first_match(line) else {
            return Ok(());
        };
        match rule {
            Rule::Link => link(line, ctx, out)?,
            Rule::ImportPragma => {
                let kind = match caps.get(2) {
                    Some(dialect) => format!("{}:module", dialect.as_str()),
                    None => kinds::WILDCARD.to_string(),
                };
                out.require(Item::new(kind, group(&caps, 1)));
            }
            Rule::ScriptTag => script_source(line, out),
            Rule::RequireScript | Rule::RequireModule => require_list(line, kinds::JS_MODULE, out),
            Rule::RequireGModule => require_list(line, kinds::JS_GMODULE, out),
            Rule::RequireStylesheet => require_list(line, kinds::CSS_MODULE, out),
            Rule::DataComponent => {
                let name = unquote(group(&caps, 1).trim());
                if !name.is_empty() {
                    out.require(Item::new(kinds::JS_COMPONENT, name));
                }
            }
            Rule::Include => {
                let rest = &line[caps.get(0).map_or(0, |m| m.end())..];
                include(rest, out);
            }
            Rule::JsxImport => jsx_import(group(&caps, 1), ctx, out)?,
        }
        Ok(())
    }
}

impl Default for MarkupScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for MarkupScanner {
    fn parse_line(
        &mut self,
        line: &str,
        ctx: &ParseContext<'_>,
        out: &mut Collected,
    ) -> Result<(), DeparseError> {
        let embedded_ctx = ParseContext {
            kind_hint: None,
            ..*ctx
        };

        let mut dedent = false;
        if let Embedding::Embedded {
            indent,
            inner,
        } = &mut self.state
        {
            let depth = indentation(line);
            if depth > *indent {
                inner.parse_line(&line[depth..], &embedded_ctx, out)?;
            } else {
                dedent = !line.trim().is_empty();
            }
        }
        if dedent {
            self.detach(&embedded_ctx, out)?;
        }

        if let Some(caps) = SCRIPT.captures(line) {
            self.detach(&embedded_ctx, out)?;
            let inner: Box<dyn LineParser> = match caps.get(2).map(|m| m.as_str()) {
                Some("sugar") => Box::new(SugarScanner::new()),
                _ => Box::new(ModuleScanner),
            };
            self.state = Embedding::Embedded {
                indent: group(&caps, 1).len(),
                inner,
            };
        }

        self.host_line(line, ctx, out)
    }

    fn finish(&mut self, ctx: &ParseContext<'_>, out: &mut Collected) -> Result<(), DeparseError> {
        let embedded_ctx = ParseContext {
            kind_hint: None,
            ..*ctx
        };
        self.detach(&embedded_ctx, out)
    }
}

/// Parses a PAML attribute list: `name=value` pairs separated by commas.
///
/// Values may be single-quoted, double-quoted or bare. Names may carry a
/// `ns::` prefix, reported as `ns:name`. Whitespace after a comma is
/// allowed.
pub fn parse_attributes(
    text: &str,
    ctx: &ParseContext<'_>,
) -> Result<Vec<(String, Option<String>)>, DeparseError> {
    let mut attributes = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let caps = ATTRIBUTE
            .captures(rest)
            .ok_or_else(|| ctx.malformed(format!("malformed attributes: {text}")))?;
        let name = group(&caps, 1).replace("::", ":");
        let value = caps.get(2).map(|m| unquote(m.as_str().trim()).to_string());
        attributes.push((name, value));

        rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
        if rest.is_empty() {
            break;
        }
        rest = rest
            .strip_prefix(',')
            .ok_or_else(|| ctx.malformed(format!("attributes must be comma-separated: {rest}")))?;
        if rest.trim().is_empty() {
            return Err(ctx.malformed(format!("trailing comma with no remaining attributes: {text}")));
        }
    }
    Ok(attributes)
}

fn attribute<'a>(attributes: &'a [(String, Option<String>)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| value.as_deref())
}

fn link(line: &str, ctx: &ParseContext<'_>, out: &mut Collected) -> Result<(), DeparseError> {
    let attributes = parse_attributes(between(line, '(', ')'), ctx)?;
    if attribute(&attributes, "rel") != Some("stylesheet") {
        return Ok(());
    }
    let Some(href) = attribute(&attributes, "href") else {
        return Ok(());
    };
    if href.is_empty() || href.contains(TEMPLATE_EXPRESSION_MARKER) {
        return Ok(());
    }
    let url = match href.split_once("url(") {
        Some((_, rest)) => rest.split_once(')').map_or(rest, |(inner, _)| inner),
        None => href,
    };
    let kind = if url.contains("://") { kinds::CSS_URL } else { kinds::CSS_FILE };
    out.require(Item::new(kind, url));
    Ok(())
}

fn script_source(line: &str, out: &mut Collected) {
    let Some((_, rest)) = line.split_once("src=") else {
        return;
    };
    let raw = rest.split(',').next().unwrap_or(rest);
    let raw = raw.split(')').next().unwrap_or(raw);
    let src = unquote(raw.trim());
    if !src.is_empty() && !src.contains(TEMPLATE_EXPRESSION_MARKER) {
        out.require(Item::new(kinds::JS_FILE, src));
    }
}

fn require_list(line: &str, kind: &str, out: &mut Collected) {
    for name in between(line, '(', ')').split(',') {
        let name = unquote(name.trim());
        if !name.is_empty() {
            out.require(Item::new(kind, name));
        }
    }
}

fn include(rest: &str, out: &mut Collected) {
    let target = rest.split('+').next().unwrap_or(rest);
    let target = target.split('{').next().unwrap_or(target).trim();
    if target.is_empty() {
        return;
    }
    let mut target = target.to_string();
    if Path::new(&target).extension().is_none() {
        target.push_str(".paml");
    }
    let kind = if target.ends_with(".svg") { kinds::ANY_FILE } else { kinds::PAML_FILE };
    out.require(Item::new(kind, target));
}

fn jsx_import(params: &str, ctx: &ParseContext<'_>, out: &mut Collected) -> Result<(), DeparseError> {
    let mut component = None;
    let mut from = None;
    for pair in params.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ctx.malformed(format!("expected name=value in jsx import: {pair}")))?;
        let value = unquote(value.trim());
        match key.trim() {
            "component" => component = Some(value),
            "from" => from = Some(value),
            _ => {}
        }
    }
    if let Some(name) = component {
        out.require(Item::new(kinds::JS_COMPONENT, name));
    } else if let Some(name) = from {
        out.require(Item::new(kinds::JS_MODULE, name));
    }
    Ok(())
}

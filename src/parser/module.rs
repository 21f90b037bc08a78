//! JavaScript module scanner.
//!
//! Recognizes CommonJS `require`, ES `import ... from` and Closure
//! `goog.provide` / `goog.module` / `goog.require` declarations. The file
//! itself provides a module named after its basename, with any `-<version>`
//! suffix removed.

use std::sync::LazyLock;

use super::rules::{RuleTable, group, unquote};
use super::{Collected, LineParser, ParseContext};
use crate::core::{DeparseError, Item, kinds};
use crate::utils::{module_name, relative_to_source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Require,
    Import,
    GoogleProvide,
    GoogleRequire,
}

/// Tried in this order; the first match wins.
const RULES: &[(Rule, &str)] = &[
    (
        Rule::Require,
        r"\s*(?:(?:var|let|const)\s+|exports\.)[\w$]+\s*=\s*require\s*\(([^)]+)\)",
    ),
    (
        Rule::Import,
        r#"\s*import\s+(?:\{[^}]*\}|\*\s+as\s+[\w$-]+|[\w$-]+)\s*(?:from\s+['"]([^'"]+)['"])?"#,
    ),
    (Rule::GoogleProvide, r#"\s*goog\.(?:provide|module)\s*\(\s*['"]([^'"]+)['"]\s*\)"#),
    (
        Rule::GoogleRequire,
        r#"\s*(?:(?:var|let|const)\s+[\w$]+\s*=\s*)?goog\.require\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
    ),
];

static TABLE: LazyLock<RuleTable<Rule>> = LazyLock::new(|| RuleTable::new(RULES));

#[derive(Debug, Default)]
pub struct ModuleScanner;

impl LineParser for ModuleScanner {
    fn begin(&mut self, ctx: &ParseContext<'_>, out: &mut Collected) {
        if let Some(path) = ctx.path {
            out.provide(Item::new(ctx.kind_or(kinds::JS_MODULE), module_name(path)));
        }
    }

    fn parse_line(
        &mut self,
        line: &str,
        ctx: &ParseContext<'_>,
        out: &mut Collected,
    ) -> Result<(), DeparseError> {
        let Some((rule, caps)) = TABLE.first_match(line) else {
            return Ok(());
        };
        match rule {
            Rule::Require => {
                let module = unquote(group(&caps, 1).trim());
                if !module.is_empty() {
                    out.require(Item::new(ctx.kind_or(kinds::JS_MODULE), module));
                }
            }
            Rule::Import => {
                let module = group(&caps, 1);
                if module.starts_with('.') {
                    let path = relative_to_source(ctx.path, module);
                    out.require(Item::new(kinds::JS_FILE, path.to_string_lossy()));
                } else if !module.is_empty() {
                    out.require(Item::new(ctx.kind_or(kinds::JS_MODULE), module));
                }
            }
            Rule::GoogleProvide => out.provide(Item::new(kinds::JS_GMODULE, group(&caps, 1))),
            Rule::GoogleRequire => out.require(Item::new(kinds::JS_GMODULE, group(&caps, 1))),
        }
        Ok(())
    }
}

//! Sugar (`.sjs`) scanner.
//!
//! ```text
//! @module widgets.button
//! @feature sugar 2
//! @import Widget, Events from widgets
//! ```
//!
//! `@import` lists are comma-separated; only the first word of each entry is
//! the module name. When the line has a `from` clause the names after it are
//! used instead.

use std::sync::LazyLock;

use tracing::trace;

use super::rules::{RuleTable, group};
use super::{Collected, LineParser, ParseContext};
use crate::core::{DeparseError, Item, kinds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Module,
    Feature,
    Import,
}

/// Tried in this order; the first match wins.
const RULES: &[(Rule, &str)] = &[
    (Rule::Module, r"@module\s+(\S+)"),
    (Rule::Feature, r"@feature\s+sugar\s*[= ]\s*2.*$"),
    (Rule::Import, r"@import"),
];

static TABLE: LazyLock<RuleTable<Rule>> = LazyLock::new(|| RuleTable::new(RULES));

#[derive(Debug)]
pub struct SugarScanner {
    version: u8,
}

impl SugarScanner {
    pub fn new() -> Self {
        Self::with_version(1)
    }

    /// A scanner for text already known to be Sugar 2, as in `@sugar2`
    /// blocks.
    pub fn with_version(version: u8) -> Self {
        Self {
            version,
        }
    }

    /// Language version, raised to 2 by `@feature sugar 2`.
    pub fn version(&self) -> u8 {
        self.version
    }
}

impl Default for SugarScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for SugarScanner {
    fn parse_line(
        &mut self,
        line: &str,
        ctx: &ParseContext<'_>,
        out: &mut Collected,
    ) -> Result<(), DeparseError> {
        let Some((rule, caps)) = TABLE.first_match(line) else {
            return Ok(());
        };
        let kind = ctx.kind_or(kinds::JS_MODULE);
        match rule {
            Rule::Module => out.provide(Item::new(kind, group(&caps, 1))),
            Rule::Feature => {
                trace!("Sugar 2 features enabled at line {}", ctx.line);
                self.version = 2;
            }
            Rule::Import => {
                let rest = &line[caps.get(0).map_or(0, |m| m.end())..];
                let names = rest.split_once(" from ").map_or(rest, |(_, from)| from);
                for entry in names.split(',') {
                    if let Some(name) = entry.split_whitespace().next() {
                        out.require(Item::new(kind, name));
                    }
                }
            }
        }
        Ok(())
    }
}

//! C and C++ `#include` scanner.

use std::sync::LazyLock;

use super::rules::{RuleTable, group};
use super::{Collected, LineParser, ParseContext};
use crate::core::{DeparseError, Item, kinds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Include,
}

const RULES: &[(Rule, &str)] = &[(Rule::Include, r#"\s*#include\s+[<"]([^>"]+)[>"]"#)];

static TABLE: LazyLock<RuleTable<Rule>> = LazyLock::new(|| RuleTable::new(RULES));

/// Provides `c:header <file name>` and requires every included header.
#[derive(Debug, Default)]
pub struct HeaderScanner;

impl LineParser for HeaderScanner {
    fn begin(&mut self, ctx: &ParseContext<'_>, out: &mut Collected) {
        if let Some(name) = ctx.path.and_then(|path| path.file_name()) {
            out.provide(Item::new(kinds::C_HEADER, name.to_string_lossy()));
        }
    }

    fn parse_line(
        &mut self,
        line: &str,
        _ctx: &ParseContext<'_>,
        out: &mut Collected,
    ) -> Result<(), DeparseError> {
        if let Some((Rule::Include, caps)) = TABLE.first_match(line) {
            out.require(Item::new(kinds::C_HEADER, group(&caps, 1)));
        }
        Ok(())
    }
}

//! `.block` file scanner.
//!
//! A block file is a sequence of `@directive params` headers, each followed
//! by tab-indented content:
//!
//! ```text
//! @import widgets.js theme.css
//! @component button {label: "Save"}
//! @paml
//! 	<link(rel="stylesheet", href="button.css")
//! @pcss
//! 	@use "theme";
//! ```
//!
//! Content is collected while scanning and interpreted once the whole file
//! has been read: `sugar2`, `paml` and `pcss` blocks are handed to the
//! matching scanner, whose output is merged into the block file's own.
//! Every block file also depends on the shared `block.xsl` stylesheet.

use std::sync::LazyLock;

use super::markup::MarkupScanner;
use super::rules::{RuleTable, group};
use super::stylesheet::StylesheetScanner;
use super::sugar::SugarScanner;
use super::{Collected, LineParser, ParseContext, scan};
use crate::constants::BLOCK_STYLESHEET;
use crate::core::{DeparseError, Item, kinds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Directive,
    Content,
}

/// Tried in this order; the first match wins.
const RULES: &[(Rule, &str)] = &[(Rule::Directive, r"@(\w+)(\s+.*)?$"), (Rule::Content, r"\t(.*)$")];

static TABLE: LazyLock<RuleTable<Rule>> = LazyLock::new(|| RuleTable::new(RULES));

#[derive(Debug)]
struct Section {
    name: String,
    params: String,
    lines: Vec<String>,
}

#[derive(Debug, Default)]
pub struct BlockScanner {
    sections: Vec<Section>,
}

impl BlockScanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineParser for BlockScanner {
    fn begin(&mut self, _ctx: &ParseContext<'_>, out: &mut Collected) {
        self.sections.clear();
        out.require(Item::new(kinds::ANY_FILE, BLOCK_STYLESHEET));
    }

    fn parse_line(
        &mut self,
        line: &str,
        _ctx: &ParseContext<'_>,
        _out: &mut Collected,
    ) -> Result<(), DeparseError> {
        match TABLE.first_match(line) {
            Some((Rule::Directive, caps)) => self.sections.push(Section {
                name: group(&caps, 1).to_string(),
                params: group(&caps, 2).trim().to_string(),
                lines: Vec::new(),
            }),
            Some((Rule::Content, caps)) => {
                if let Some(section) = self.sections.last_mut() {
                    section.lines.push(group(&caps, 1).to_string());
                }
            }
            None => {}
        }
        Ok(())
    }

    fn finish(&mut self, ctx: &ParseContext<'_>, out: &mut Collected) -> Result<(), DeparseError> {
        let inner_ctx = ParseContext::new(ctx.path, None);
        for section in std::mem::take(&mut self.sections) {
            let mut parser: Box<dyn LineParser> = match section.name.as_str() {
                "sugar2" => Box::new(SugarScanner::with_version(2)),
                "paml" => Box::new(MarkupScanner::new()),
                "pcss" => Box::new(StylesheetScanner::preprocessed()),
                "import" => {
                    for name in section.params.split_whitespace() {
                        let extension = name.rsplit_once('.').map_or(name, |(_, ext)| ext);
                        out.require(Item::new(format!("{extension}:file"), name));
                    }
                    continue;
                }
                "component" => {
                    let names = section.params.split('{').next().unwrap_or_default();
                    for name in names.split_whitespace() {
                        out.require(Item::new(kinds::JS_COMPONENT, name));
                    }
                    continue;
                }
                _ => continue,
            };
            let mut nested = Collected::default();
            scan(parser.as_mut(), &section.lines.join("\n"), &inner_ctx, &mut nested)?;
            out.extend(&nested);
        }
        Ok(())
    }
}

//! Per-format dependency scanners.
//!
//! Every supported dialect is a line scanner: it reads a file line by line,
//! matches each line against an ordered rule table and appends to the file's
//! provides and requires. The dialects form a closed set, [`Dialect`], which
//! also carries each dialect's resolution heuristics (see [`resolve`]).
//!
//! | Dialect | Extensions | Scanner |
//! |---|---|---|
//! | [`Dialect::Header`] | `c`, `cxx`, `c++`, `cpp`, `h` | [`header::HeaderScanner`] |
//! | [`Dialect::Module`] | `js` | [`module::ModuleScanner`] |
//! | [`Dialect::Sugar`] | `sjs` | [`sugar::SugarScanner`] |
//! | [`Dialect::Markup`] | `paml` | [`markup::MarkupScanner`] |
//! | [`Dialect::Stylesheet`] | `css` | [`stylesheet::StylesheetScanner`] |
//! | [`Dialect::PreprocessedStylesheet`] | `pcss` | [`stylesheet::StylesheetScanner`] |
//! | [`Dialect::Block`] | `block` | [`block::BlockScanner`] |
//! | [`Dialect::Component`] | `component` | [`component::ComponentScanner`] |
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse_cli::core::Item;
//! use deparse_cli::parser::{Dialect, ParseContext};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), deparse_cli::core::DeparseError> {
//! let ctx = ParseContext::new(Some(Path::new("lib/js/app.js")), None);
//! let result = Dialect::Module.parse_text("var _ = require(\"lodash\");", &ctx)?;
//! assert_eq!(result.provides, vec![Item::new("js:module", "app")]);
//! assert_eq!(result.requires, vec![Item::new("js:module", "lodash")]);
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod component;
pub mod header;
pub mod markup;
pub mod module;
pub mod registry;
pub mod resolve;
pub mod rules;
pub mod stylesheet;
pub mod sugar;


pub use registry::ParserRegistry;
pub use resolve::SearchScope;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::core::{Candidate, DeparseError, Item, merge_unique};
use crate::utils::read_source;

/// Output lists a scanner appends into.
///
/// An embedded scanner receives the host's `Collected`, so both write to the
/// same lists. Appends skip items already present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub provides: Vec<Item>,
    pub requires: Vec<Item>,
}

impl Collected {
    pub fn provide(&mut self, item: Item) {
        if !self.provides.contains(&item) {
            self.provides.push(item);
        }
    }

    pub fn require(&mut self, item: Item) {
        if !self.requires.contains(&item) {
            self.requires.push(item);
        }
    }

    /// Appends another scanner's output.
    pub fn extend(&mut self, other: &Collected) {
        merge_unique(&mut self.provides, &other.provides);
        merge_unique(&mut self.requires, &other.requires);
    }
}

/// What a scanner knows about the text it is reading.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// Source file, `None` when parsing a bare string.
    pub path: Option<&'a Path>,
    /// Kind to tag provided symbols with instead of the scanner default.
    pub kind_hint: Option<&'a str>,
    /// 1-based number of the line being scanned.
    pub line: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(path: Option<&'a Path>, kind_hint: Option<&'a str>) -> Self {
        Self {
            path,
            kind_hint,
            line: 0,
        }
    }

    fn at_line(self, line: usize) -> Self {
        Self {
            line,
            ..self
        }
    }

    /// The hint, or `default` when there is none.
    pub fn kind_or(&self, default: &'a str) -> &'a str {
        self.kind_hint.unwrap_or(default)
    }

    /// A malformed-declaration error located at the current line.
    pub fn malformed(&self, reason: impl Into<String>) -> DeparseError {
        DeparseError::MalformedDeclaration {
            path: self.path.map_or_else(|| PathBuf::from("<text>"), Path::to_path_buf),
            line: self.line,
            reason: reason.into(),
        }
    }
}

/// A line scanner for one dialect.
///
/// The driver calls [`begin`](LineParser::begin) once, then
/// [`parse_line`](LineParser::parse_line) for every line, then
/// [`finish`](LineParser::finish). Scanners embedded inside another scanner
/// skip `begin`: they contribute only what their lines declare.
pub trait LineParser {
    fn begin(&mut self, _ctx: &ParseContext<'_>, _out: &mut Collected) {}

    fn parse_line(
        &mut self,
        line: &str,
        ctx: &ParseContext<'_>,
        out: &mut Collected,
    ) -> Result<(), DeparseError>;

    fn finish(&mut self, _ctx: &ParseContext<'_>, _out: &mut Collected) -> Result<(), DeparseError> {
        Ok(())
    }
}

/// The provides and requires of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub path: Option<PathBuf>,
    pub provides: Vec<Item>,
    pub requires: Vec<Item>,
}

/// Runs a scanner over `text`, line by line.
pub fn scan(
    parser: &mut dyn LineParser,
    text: &str,
    ctx: &ParseContext<'_>,
    out: &mut Collected,
) -> Result<(), DeparseError> {
    parser.begin(ctx, out);
    for (index, line) in text.lines().enumerate() {
        parser.parse_line(line, &ctx.at_line(index + 1), out)?;
    }
    parser.finish(&ctx.at_line(0), out)
}

/// The closed set of supported dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Dialect {
    Header,
    Module,
    Sugar,
    Markup,
    Stylesheet,
    PreprocessedStylesheet,
    Block,
    Component,
}

impl Dialect {
    /// Every dialect, in the order the resolver queries them.
    pub const ALL: [Dialect; 8] = [
        Dialect::Block,
        Dialect::Markup,
        Dialect::Sugar,
        Dialect::Module,
        Dialect::PreprocessedStylesheet,
        Dialect::Stylesheet,
        Dialect::Header,
        Dialect::Component,
    ];

    /// Name used in the `[extensions]` configuration table.
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "c",
            Self::Module => "js",
            Self::Sugar => "sjs",
            Self::Markup => "paml",
            Self::Stylesheet => "css",
            Self::PreprocessedStylesheet => "pcss",
            Self::Block => "block",
            Self::Component => "component",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dialect| dialect.name().eq_ignore_ascii_case(name))
    }

    /// A fresh scanner for this dialect.
    pub fn line_parser(self) -> Box<dyn LineParser> {
        match self {
            Self::Header => Box::new(header::HeaderScanner),
            Self::Module => Box::new(module::ModuleScanner),
            Self::Sugar => Box::new(sugar::SugarScanner::new()),
            Self::Markup => Box::new(markup::MarkupScanner::new()),
            Self::Stylesheet => Box::new(stylesheet::StylesheetScanner::plain()),
            Self::PreprocessedStylesheet => Box::new(stylesheet::StylesheetScanner::preprocessed()),
            Self::Block => Box::new(block::BlockScanner::new()),
            Self::Component => Box::new(component::ComponentScanner),
        }
    }

    /// Parses a string.
    pub fn parse_text(self, text: &str, ctx: &ParseContext<'_>) -> Result<ParseResult, DeparseError> {
        let mut out = Collected::default();
        let mut parser = self.line_parser();
        scan(parser.as_mut(), text, ctx, &mut out)?;
        Ok(ParseResult {
            path: ctx.path.map(Path::to_path_buf),
            provides: out.provides,
            requires: out.requires,
        })
    }

    /// Reads and parses a file.
    pub fn parse_path(self, path: &Path, kind_hint: Option<&str>) -> Result<ParseResult, DeparseError> {
        trace!("Parsing {} as {}", path.display(), self.name());
        let text = read_source(path)?;
        self.parse_text(&text, &ParseContext::new(Some(path), kind_hint))
    }

    /// Candidate locations for `item`, ordered and without duplicates.
    pub fn resolve(self, item: &Item, scope: &SearchScope<'_>) -> Vec<Candidate> {
        match self {
            Self::Component => resolve::resolve_component(item, scope),
            _ => resolve::resolve_item(item, scope),
        }
    }
}

//! Dependency identifiers.
//!
//! Every dependency or exported symbol is an [`Item`]: a `(kind, name)` pair
//! where the kind is a colon-separated `"<dialect>:<category>"` tag such as
//! `js:module` or `css:file`. The kind strings are part of the tool's output
//! format and are kept verbatim; the constants in [`kinds`] list the ones the
//! built-in parsers emit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind strings emitted by the built-in parsers.
pub mod kinds {
    pub const JS_MODULE: &str = "js:module";
    pub const JS_GMODULE: &str = "js:gmodule";
    pub const JS_COMPONENT: &str = "js:component";
    pub const JS_FILE: &str = "js:file";
    pub const SJS_MODULE: &str = "sjs:module";
    pub const SJS_GMODULE: &str = "sjs:gmodule";
    pub const SJS_COMPONENT: &str = "sjs:component";
    pub const CSS_MODULE: &str = "css:module";
    pub const CSS_FILE: &str = "css:file";
    pub const CSS_URL: &str = "css:url";
    pub const PCSS_MODULE: &str = "pcss:module";
    pub const PCSS_FILE: &str = "pcss:file";
    pub const C_HEADER: &str = "c:header";
    pub const PAML_FILE: &str = "paml:file";
    pub const ANY_FILE: &str = "*:file";
    /// Matches any dialect and any category.
    pub const WILDCARD: &str = "*";
}

/// A `(kind, name)` dependency identifier.
///
/// Equality is structural: two items are the same dependency only when both
/// the kind and the name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item {
    /// Colon-separated kind tag, e.g. `js:module`.
    pub kind: String,
    /// Symbolic name or path, depending on the kind.
    pub name: String,
}

impl Item {
    /// Create a new item.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// An item of the wildcard kind, matched by every lookup.
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(kinds::WILDCARD, name)
    }

    /// The part of the kind before the colon (`js` for `js:module`).
    pub fn dialect(&self) -> &str {
        kind_dialect(&self.kind)
    }

    /// The part of the kind after the colon (`module` for `js:module`).
    ///
    /// Empty for kinds without a colon.
    pub fn category(&self) -> &str {
        kind_category(&self.kind)
    }

    /// URL items are never looked up on the filesystem.
    pub fn is_url(&self) -> bool {
        self.kind.ends_with(":url")
    }

    /// File items name a path rather than a symbol.
    pub fn is_file(&self) -> bool {
        self.kind.ends_with(":file")
    }

    /// True for `*` and `*:<category>` kinds.
    pub fn is_wildcard(&self) -> bool {
        self.kind == kinds::WILDCARD || self.dialect() == kinds::WILDCARD
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Dialect part of a kind string.
pub fn kind_dialect(kind: &str) -> &str {
    kind.split_once(':').map_or(kind, |(dialect, _)| dialect)
}

/// Category part of a kind string, empty when there is no colon.
pub fn kind_category(kind: &str) -> &str {
    kind.split_once(':').map_or("", |(_, category)| category)
}

/// Whether a kind may be used to tag the items a file provides.
///
/// File, URL and wildcard kinds describe how a file was found, not what it
/// exports, so they never override a parser's default provided kind.
pub fn is_symbol_kind(kind: &str) -> bool {
    let dialect = kind_dialect(kind);
    let category = kind_category(kind);
    !category.is_empty() && dialect != kinds::WILDCARD && category != "file" && category != "url"
}

/// A resolution hit: the file (or URL) that satisfies an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Kind of the hit, which may be more specific than the requested kind
    /// (a `js:module` requirement can be satisfied by an `sjs:module` file).
    pub kind: String,
    /// Location of the hit. URL items keep their URL here unchanged.
    pub path: PathBuf,
}

impl Candidate {
    pub fn new(kind: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parts() {
        let item = Item::new(kinds::JS_MODULE, "lodash");
        assert_eq!(item.dialect(), "js");
        assert_eq!(item.category(), "module");
        assert!(!item.is_url());
        assert!(!item.is_file());

        let bare = Item::new(kinds::WILDCARD, "block.xsl");
        assert_eq!(bare.dialect(), "*");
        assert_eq!(bare.category(), "");
        assert!(bare.is_wildcard());
    }

    #[test]
    fn test_url_and_file_kinds() {
        assert!(Item::new(kinds::CSS_URL, "https://cdn/x.css").is_url());
        assert!(Item::new(kinds::ANY_FILE, "logo.svg").is_file());
        assert!(Item::new(kinds::ANY_FILE, "logo.svg").is_wildcard());
        assert!(!Item::new(kinds::CSS_FILE, "theme.css").is_wildcard());
    }

    #[test]
    fn test_symbol_kinds() {
        assert!(is_symbol_kind(kinds::JS_MODULE));
        assert!(is_symbol_kind(kinds::JS_GMODULE));
        assert!(is_symbol_kind(kinds::SJS_MODULE));
        assert!(!is_symbol_kind(kinds::JS_FILE));
        assert!(!is_symbol_kind(kinds::CSS_URL));
        assert!(!is_symbol_kind(kinds::ANY_FILE));
        assert!(!is_symbol_kind(kinds::WILDCARD));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Item::new("js:module", "a"), Item::new("js:module", "a"));
        assert_ne!(Item::new("js:module", "a"), Item::new("sjs:module", "a"));
    }
}

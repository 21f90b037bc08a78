//! Ordered line-rule tables and small text helpers shared by the scanners.
//!
//! A [`RuleTable`] pairs regular expressions with handler tags. Rules are
//! tried in declaration order and only the first match fires, so the order of
//! each scanner's `RULES` constant is part of its behavior.
//!
//! Patterns are anchored at the start of the line, the way a line scanner
//! reads them: `@import` matches `@import reset.css` but not
//! `/* @import */`.

use regex::{Captures, Regex};

/// A compiled, ordered list of `(handler, pattern)` rules.
#[derive(Debug)]
pub struct RuleTable<H> {
    rules: Vec<(H, Regex)>,
}

impl<H: Copy> RuleTable<H> {
    /// Compiles the rules, anchoring every pattern at the line start.
    ///
    /// # Panics
    ///
    /// Panics if a pattern is not a valid regular expression. Tables are
    /// built from literals, and every table is compiled by the unit tests.
    pub fn new(rules: &[(H, &str)]) -> Self {
        let rules = rules
            .iter()
            .map(|(handler, pattern)| {
                let anchored = format!("^(?:{pattern})");
                let regex = Regex::new(&anchored)
                    .unwrap_or_else(|e| panic!("invalid built-in rule {pattern:?}: {e}"));
                (*handler, regex)
            })
            .collect();
        Self {
            rules,
        }
    }

    /// Returns the handler and captures of the first matching rule.
    pub fn first_match<'t>(&self, line: &'t str) -> Option<(H, Captures<'t>)> {
        self.rules
            .iter()
            .find_map(|(handler, regex)| regex.captures(line).map(|caps| (*handler, caps)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Strips one pair of matching single or double quotes.
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() > 1 && bytes[0] == bytes[bytes.len() - 1] && matches!(bytes[0], b'"' | b'\'') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Text of capture group `index`, or `""` when it did not participate.
pub fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Text between the first `open` and the last `close` (`a(b)c` → `b`).
///
/// Without a closing delimiter everything after `open` is returned.
pub fn between(text: &str, open: char, close: char) -> &str {
    let inner = text.split_once(open).map_or(text, |(_, rest)| rest);
    inner.rsplit_once(close).map_or(inner, |(head, _)| head)
}

/// Number of leading tab characters.
pub fn indentation(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b'\t').count()
}

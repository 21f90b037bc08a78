//! `.component` marker files.
//!
//! A component is a folder of convention files (see
//! [`resolve_component`](super::resolve::resolve_component)). The marker file
//! itself declares nothing; it provides the component named after its stem.

use super::{Collected, LineParser, ParseContext};
use crate::core::{DeparseError, Item, kinds};

#[derive(Debug, Default)]
pub struct ComponentScanner;

impl LineParser for ComponentScanner {
    fn begin(&mut self, ctx: &ParseContext<'_>, out: &mut Collected) {
        if let Some(stem) = ctx.path.and_then(|path| path.file_stem()) {
            out.provide(Item::new(kinds::JS_COMPONENT, stem.to_string_lossy()));
        }
    }

    fn parse_line(
        &mut self,
        _line: &str,
        _ctx: &ParseContext<'_>,
        _out: &mut Collected,
    ) -> Result<(), DeparseError> {
        Ok(())
    }
}

//! Name lookup across every registered dialect.
//!
//! The [`Resolver`] owns what a lookup needs besides the item itself: the
//! parser registry, the configuration and the extra search directories. It
//! answers two questions:
//!
//! - [`Resolver::resolve_with`]: where does one dialect's heuristic find an
//!   item declared by a given file?
//! - [`Resolver::find`]: where does *any* registered dialect find a set of
//!   names? This backs the `--find` command line mode and the tracker's
//!   fallback when a file's own dialect comes up empty.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse_cli::config::Config;
//! use deparse_cli::core::Item;
//! use deparse_cli::parser::ParserRegistry;
//! use deparse_cli::resolver::Resolver;
//!
//! let mut resolver = Resolver::new(ParserRegistry::new(), Config::default());
//! resolver.add_path("vendor");
//!
//! let matches = resolver.find(&[Item::any("jquery")], None);
//! for (item, candidates) in matches.iter() {
//!     for candidate in candidates {
//!         println!("{}\t{}\t{}", item.name, candidate.path.display(), candidate.kind);
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use tracing::{Span, debug, info_span};

use crate::config::Config;
use crate::core::{Candidate, Item, ResolutionCache};
use crate::parser::{Dialect, ParserRegistry, SearchScope};
use crate::utils::absolutize;

/// Lookup state shared by every resolution.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: ParserRegistry,
    config: Config,
    extra_dirs: Vec<PathBuf>,
    span: Span,
}

impl Resolver {
    /// Creates a resolver searching the configured `[search] paths` first.
    pub fn new(registry: ParserRegistry, config: Config) -> Self {
        let extra_dirs = config.search.paths.clone();
        Self {
            registry,
            config,
            extra_dirs,
            span: info_span!("resolver"),
        }
    }

    /// Runs lookups inside `span` instead of the default `resolver` span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Adds a directory searched before the working directory.
    ///
    /// Directories are searched in the order they were added.
    pub fn add_path(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        let dir = dir.into();
        if !self.extra_dirs.contains(&dir) {
            debug!("Adding search path {}", dir.display());
            self.extra_dirs.push(dir);
        }
        self
    }

    pub fn extra_dirs(&self) -> &[PathBuf] {
        &self.extra_dirs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// The lookup scope for a requirement declared by `context`.
    pub fn scope<'a>(&'a self, context: &'a Path) -> SearchScope<'a> {
        SearchScope::new(&self.config, &self.extra_dirs, context)
    }

    /// Candidates found by `dialect`'s heuristic.
    pub fn resolve_with(&self, dialect: Dialect, item: &Item, context: &Path) -> Vec<Candidate> {
        let _entered = self.span.enter();
        dialect.resolve(item, &self.scope(context))
    }

    /// Looks every item up with every registered dialect.
    ///
    /// A wildcard kind (`*`) runs every lookup; any other kind restricts each
    /// dialect to that kind's lookup. Items are keyed as given, in input
    /// order; an item nothing found maps to an empty list. Lookups are
    /// anchored at `context`, or at the working directory when it is `None`.
    pub fn find(&self, items: &[Item], context: Option<&Path>) -> ResolutionCache {
        let _entered = self.span.enter();
        let context = context.map_or_else(|| absolutize(Path::new(".")), Path::to_path_buf);
        let scope = self.scope(&context);
        let dialects = self.registry.dialects();

        let mut matches = ResolutionCache::new();
        for item in items {
            matches.entry(item);
            for dialect in &dialects {
                let found = dialect.resolve(item, &scope);
                if !found.is_empty() {
                    debug!("{} found {} candidate(s) for {}", dialect.name(), found.len(), item);
                    matches.merge(item, &found);
                }
            }
        }
        matches
    }

    /// [`find`](Self::find) for bare names, each looked up with the
    /// wildcard kind.
    pub fn find_names<S: AsRef<str>>(&self, names: &[S], context: Option<&Path>) -> ResolutionCache {
        let items: Vec<Item> = names.iter().map(|name| Item::any(name.as_ref())).collect();
        self.find(&items, context)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ParserRegistry::new(), Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinds;
    use crate::test_utils::SourceTree;

    #[test]
    fn test_find_merges_every_dialect() {
        let tree = SourceTree::new();
        let sjs = tree.write("lib/sjs/widgets.sjs", "@module widgets\n");
        let model = tree.write("components/widgets/model.js", "");

        let resolver = Resolver::default();
        let matches = resolver.find(&[Item::any("widgets")], Some(&tree.root()));
        let found = matches.get(&Item::any("widgets")).unwrap();

        assert_eq!(found[0], Candidate::new(kinds::SJS_MODULE, sjs));
        // Component folders are found by the component dialect whatever the kind.
        assert!(found.contains(&Candidate::new(kinds::JS_MODULE, model)));
    }

    #[test]
    fn test_find_keeps_unknown_names() {
        let tree = SourceTree::new();
        let resolver = Resolver::default();
        let matches = resolver.find_names(&["no-such-name-anywhere"], Some(&tree.root()));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.get(&Item::any("no-such-name-anywhere")), Some(&[][..]));
    }

    #[test]
    fn test_find_with_specific_kind() {
        let tree = SourceTree::new();
        tree.write("lib/css/theme.css", "");
        let model = tree.write("components/theme/model.sjs", "");

        let resolver = Resolver::default();
        let item = Item::new(kinds::JS_COMPONENT, "theme");
        let matches = resolver.find(&[item.clone()], Some(&tree.root()));
        assert_eq!(matches.get(&item).unwrap(), &[Candidate::new(kinds::SJS_MODULE, model)][..]);
    }

    #[test]
    fn test_extra_paths_are_searched() {
        let tree = SourceTree::new();
        let vendored = tree.write("vendor/lib/js/jquery-3.7.1.js", "");
        let elsewhere = SourceTree::new();

        let mut resolver = Resolver::default();
        resolver.add_path(tree.path("vendor")).add_path(tree.path("vendor"));
        assert_eq!(resolver.extra_dirs().len(), 1);

        let found = resolver.resolve_with(
            Dialect::Module,
            &Item::new(kinds::JS_MODULE, "jquery"),
            &elsewhere.path("app.js"),
        );
        assert_eq!(found, vec![Candidate::new(kinds::JS_MODULE, vendored)]);
    }

    #[test]
    fn test_configured_paths_seed_extra_dirs() {
        let mut config = Config::default();
        config.search.paths = vec![PathBuf::from("shared")];
        let resolver = Resolver::new(ParserRegistry::new(), config);
        assert_eq!(resolver.extra_dirs(), &[PathBuf::from("shared")]);
    }
}

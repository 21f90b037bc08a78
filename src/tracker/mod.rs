//! Recursive dependency tracking.
//!
//! The [`Tracker`] parses a file, resolves every requirement to candidate
//! files, and (when asked to) parses those candidates in turn until no new
//! file turns up. Along the way it accumulates:
//!
//! - `provides`: what the top-level files provide
//! - `requires`: everything required anywhere, plus what dependency files
//!   provide
//! - the node map: provided item → merged requirements
//! - the resolution cache: requirement → candidate locations
//! - issues: non-fatal problems, each also logged
//!
//! # Traversal
//!
//! Files are visited depth-first from an explicit work stack, so deep chains
//! of includes never grow the call stack. Each file is visited at most once
//! per tracker, keyed on its absolute normalized path, which also makes
//! cyclic includes terminate. A path that does not exist but contains `+` is
//! a composite: `lib/js/a.js+b.js` visits `lib/js/a.js` then `lib/js/b.js`.
//!
//! # Error handling
//!
//! Dependency-level problems never abort a run: unsupported extensions,
//! unresolved requirements, unreadable or malformed dependency files are
//! recorded as [`Issue`]s. Only a top-level path that cannot be read makes
//! [`Tracker::from_path`] return an error, after the rest of the argument
//! has still been processed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse_cli::tracker::Tracker;
//!
//! # fn example() -> Result<(), deparse_cli::core::DeparseError> {
//! let mut tracker = Tracker::default();
//! tracker.from_path("app.sjs", true)?;
//! for item in tracker.load_order() {
//!     println!("{}\t{}", item.kind, item.name);
//! }
//! # Ok(())
//! # }
//! ```

mod order;


pub use order::sort_requires;

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{Span, debug, error, info_span, warn};

use crate::core::{
    Candidate, DeparseError, Item, ItemTable, NodeMap, ResolutionCache, is_symbol_kind,
    kind_category, merge_unique,
};
use crate::parser::Dialect;
use crate::resolver::Resolver;
use crate::utils::{absolutize, extension_of, normalize_path, split_composite};

/// A non-fatal problem met while tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Machine-readable tag, see [`DeparseError::code`].
    pub code: &'static str,
    pub message: String,
}

impl From<&DeparseError> for Issue {
    fn from(error: &DeparseError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Where one item was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub item: Item,
    pub candidates: Vec<Candidate>,
}

/// Serializable snapshot of a tracker, for `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerReport {
    pub provides: Vec<Item>,
    pub load_order: Vec<Item>,
    pub resolved: Vec<Resolution>,
    pub issues: Vec<Issue>,
}

/// One pending file.
#[derive(Debug, Clone)]
struct Visit {
    path: PathBuf,
    kind_hint: Option<String>,
    /// Reached by resolving a requirement rather than named by the caller.
    dependency: bool,
}

/// Accumulates the dependencies of one or more files.
#[derive(Debug, Clone)]
pub struct Tracker {
    resolver: Resolver,
    provides: Vec<Item>,
    requires: Vec<Item>,
    visited: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
    nodes: NodeMap,
    resolved: ResolutionCache,
    origins: ItemTable<PathBuf>,
    issues: Vec<Issue>,
    span: Span,
}

impl Tracker {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            provides: Vec::new(),
            requires: Vec::new(),
            visited: Vec::new(),
            seen: HashSet::new(),
            nodes: NodeMap::new(),
            resolved: ResolutionCache::new(),
            origins: ItemTable::new(),
            issues: Vec::new(),
            span: info_span!("tracker"),
        }
    }

    /// Runs traversals inside `span` instead of the default `tracker` span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    /// Items provided by the top-level files, in discovery order.
    pub fn provides(&self) -> &[Item] {
        &self.provides
    }

    /// Every requirement met so far, plus items provided by dependency files.
    pub fn requires(&self) -> &[Item] {
        &self.requires
    }

    /// Files parsed so far, absolute and normalized, in visit order.
    pub fn visited(&self) -> &[PathBuf] {
        &self.visited
    }

    pub fn node_map(&self) -> &NodeMap {
        &self.nodes
    }

    pub fn resolved(&self) -> &ResolutionCache {
        &self.resolved
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Files that provide `item`.
    pub fn origins(&self, item: &Item) -> &[PathBuf] {
        self.origins.get(item).unwrap_or_default()
    }

    /// Parses `path` and, when `recursive`, everything it leads to.
    ///
    /// Calling this again with an already visited path changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the first failure to read a top-level file: a path that
    /// neither exists nor splits as a composite, or an I/O error. Remaining
    /// parts of a composite argument are still processed, and the failure is
    /// also recorded as an issue.
    pub fn from_path(&mut self, path: impl AsRef<Path>, recursive: bool) -> Result<(), DeparseError> {
        let span = self.span.clone();
        let _entered = span.enter();

        let mut failure = None;
        let mut stack = vec![Visit {
            path: path.as_ref().to_path_buf(),
            kind_hint: None,
            dependency: false,
        }];
        while let Some(visit) = stack.pop() {
            match self.visit(visit, recursive) {
                Ok(next) => stack.extend(next.into_iter().rev()),
                Err(error) => {
                    failure.get_or_insert(error);
                }
            }
        }
        failure.map_or(Ok(()), Err)
    }

    /// Processes one file and returns the files to visit next, in order.
    fn visit(&mut self, visit: Visit, recursive: bool) -> Result<Vec<Visit>, DeparseError> {
        let key = normalize_path(&absolutize(&visit.path));
        if self.seen.contains(&key) {
            return Ok(Vec::new());
        }

        if !visit.path.exists() {
            if let Some(parts) = split_composite(&visit.path.to_string_lossy()) {
                debug!("Expanding composite path {}", visit.path.display());
                return Ok(parts
                    .into_iter()
                    .map(|path| Visit {
                        path,
                        ..visit.clone()
                    })
                    .collect());
            }
            let error = DeparseError::UnreadablePath {
                path: visit.path,
            };
            return self.fail(error, visit.dependency);
        }
        if visit.path.is_dir() {
            debug!("Skipping directory {}", visit.path.display());
            return Ok(Vec::new());
        }

        self.seen.insert(key.clone());
        self.visited.push(key.clone());

        let Some(dialect) = self.resolver.registry().for_path(&visit.path) else {
            let extension = extension_of(&visit.path);
            if self.resolver.config().is_ignored(&extension) {
                debug!("Ignoring {}", visit.path.display());
            } else {
                self.record(&DeparseError::UnsupportedFormat {
                    extension,
                    path: visit.path,
                });
            }
            return Ok(Vec::new());
        };

        let result = match dialect.parse_path(&visit.path, visit.kind_hint.as_deref()) {
            Ok(result) => result,
            Err(error) => return self.fail(error, visit.dependency),
        };
        debug!(
            "{} provides {} and requires {} item(s)",
            visit.path.display(),
            result.provides.len(),
            result.requires.len()
        );

        if visit.dependency {
            merge_unique(&mut self.requires, &result.provides);
        } else {
            merge_unique(&mut self.provides, &result.provides);
        }
        merge_unique(&mut self.requires, &result.requires);
        for provided in &result.provides {
            self.nodes.merge(provided, &result.requires);
            self.origins.merge(provided, std::slice::from_ref(&key));
        }

        let mut next = Vec::new();
        for required in result.requires.iter().filter(|item| !item.is_url()) {
            let found = self.resolve(dialect, required, &visit.path);
            if recursive {
                next.extend(found.into_iter().map(|candidate| Visit {
                    kind_hint: recursion_hint(&required.kind, &candidate.kind),
                    path: candidate.path,
                    dependency: true,
                }));
            }
        }
        Ok(next)
    }

    /// Resolves `item` declared in `context`, updating the cache.
    ///
    /// The declaring file's dialect is asked first; if it finds nothing,
    /// every registered dialect is. Returns what this lookup found, which
    /// may be less than the cache holds for the item.
    pub fn resolve(&mut self, dialect: Dialect, item: &Item, context: &Path) -> Vec<Candidate> {
        let mut found = self.resolver.resolve_with(dialect, item, context);
        if found.is_empty() {
            found = self
                .resolver
                .find(std::slice::from_ref(item), Some(context))
                .get(item)
                .map(<[Candidate]>::to_vec)
                .unwrap_or_default();
        }

        let (entry, created) = self.resolved.entry(item);
        if created && Path::new(&item.name).exists() {
            entry.push(Candidate::new(&item.kind, &item.name));
        }
        merge_unique(entry, &found);
        let unresolved = entry.is_empty();

        if unresolved {
            self.record(&DeparseError::UnresolvedReference {
                item: item.clone(),
                context: context.to_path_buf(),
            });
        }
        found
    }

    /// Items in dependency order: top-level provides, then requirements.
    pub fn load_order(&self) -> Vec<Item> {
        let mut roots = self.provides.clone();
        merge_unique(&mut roots, &self.requires);
        sort_requires(&self.nodes, &roots)
    }

    /// Orders arbitrary items using this tracker's node map.
    pub fn sort_requires(&self, requires: &[Item]) -> Vec<Item> {
        sort_requires(&self.nodes, requires)
    }

    /// Merges another tracker's results into this one.
    pub fn absorb(&mut self, other: Tracker) {
        merge_unique(&mut self.provides, &other.provides);
        merge_unique(&mut self.requires, &other.requires);
        for path in other.visited {
            if self.seen.insert(path.clone()) {
                self.visited.push(path);
            }
        }
        self.nodes.absorb(&other.nodes);
        self.resolved.absorb(&other.resolved);
        self.origins.absorb(&other.origins);
        self.issues.extend(other.issues);
    }

    pub fn report(&self) -> TrackerReport {
        TrackerReport {
            provides: self.provides.clone(),
            load_order: self.load_order(),
            resolved: self
                .resolved
                .iter()
                .map(|(item, candidates)| Resolution {
                    item: item.clone(),
                    candidates: candidates.to_vec(),
                })
                .collect(),
            issues: self.issues.clone(),
        }
    }

    /// Records `error`; returns it only when it concerns a top-level file
    /// that could not be read.
    fn fail(&mut self, error: DeparseError, dependency: bool) -> Result<Vec<Visit>, DeparseError> {
        self.record(&error);
        let unreadable = matches!(error, DeparseError::UnreadablePath { .. } | DeparseError::Io(_));
        if unreadable && !dependency { Err(error) } else { Ok(Vec::new()) }
    }

    fn record(&mut self, error: &DeparseError) {
        match error {
            DeparseError::UnresolvedReference { .. } => warn!("{error}"),
            _ => error!("{error}"),
        }
        self.issues.push(Issue::from(error));
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(Resolver::default())
    }
}

/// Kind hint for parsing a candidate found for a `required` item.
///
/// The requirement's kind is passed on when the candidate satisfies it in
/// the same category (a `js:module` requirement met by an `sjs:module`
/// file); otherwise the candidate's own kind is, when it names a symbol.
fn recursion_hint(required: &str, found: &str) -> Option<String> {
    if is_symbol_kind(required) && kind_category(required) == kind_category(found) {
        Some(required.to_string())
    } else if is_symbol_kind(found) {
        Some(found.to_string())
    } else {
        None
    }
}

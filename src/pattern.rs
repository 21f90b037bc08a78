//! Glob matching for kinds and for on-disk lookups.
//!
//! Two uses of the `glob` crate live here:
//!
//! - [`KindFilter`] matches item kinds such as `js:module` against
//!   user-supplied globs (`js:*`, `*:file`). It backs `--type` on the command
//!   line and the graph export filter.
//! - [`glob_in`] expands filename expressions inside a list of directories.
//!   Resolution heuristics use it to find versioned files such as
//!   `lodash-4.17.js` for a module named `lodash`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse_cli::pattern::KindFilter;
//!
//! # fn example() -> anyhow::Result<()> {
//! let filter = KindFilter::new(["js:*", "*:file"])?;
//! assert!(filter.matches("js:module"));
//! assert!(filter.matches("css:file"));
//! assert!(!filter.matches("css:module"));
//! # Ok(())
//! # }
//! ```

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::core::DeparseError;

/// A set of kind globs; an item matches when any glob matches its kind.
///
/// An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct KindFilter {
    patterns: Vec<Pattern>,
}

impl KindFilter {
    /// Compiles every glob, failing on the first invalid one.
    pub fn new<I, S>(globs: I) -> Result<Self, DeparseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = globs
            .into_iter()
            .map(|glob| {
                let glob = glob.as_ref();
                Pattern::new(glob).map_err(|e| DeparseError::InvalidPattern {
                    pattern: glob.to_string(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
        })
    }

    /// A filter accepting every kind.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn matches(&self, kind: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|pattern| pattern.matches(kind))
    }

    pub fn is_any(&self) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|pattern| pattern.as_str() == "*")
    }
}

/// Expands every expression inside every directory and returns the sorted
/// list of existing matches.
///
/// Directory names are escaped, so only the expression is interpreted as a
/// glob. Unreadable entries are skipped.
pub fn glob_in(dirs: &[PathBuf], expressions: &[String]) -> Vec<PathBuf> {
    let mut matches = Vec::new();
    for dir in dirs {
        let prefix = Pattern::escape(&dir.to_string_lossy());
        for expression in expressions {
            let pattern = if prefix.is_empty() {
                expression.clone()
            } else {
                Path::new(&prefix).join(expression).to_string_lossy().into_owned()
            };
            match glob::glob(&pattern) {
                Ok(paths) => matches.extend(paths.flatten()),
                Err(e) => trace!("Skipping invalid glob {}: {}", pattern, e),
            }
        }
    }
    matches.sort();
    matches
}

/// Joins each subdirectory onto each directory, subdirectory-major, then
/// appends the directories themselves.
///
/// An empty subdirectory yields the directory unchanged, so the directory may
/// appear more than once. Callers deduplicate matches, not directories.
pub fn subdirs(dirs: &[PathBuf], subdirs: &[String]) -> Vec<PathBuf> {
    let mut result = Vec::with_capacity(dirs.len() * (subdirs.len() + 1));
    for sub in subdirs {
        result.extend(dirs.iter().map(|dir| dir.join(sub)));
    }
    result.extend(dirs.iter().cloned());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_kind_filter() {
        let filter = KindFilter::new(["js:*"]).unwrap();
        assert!(filter.matches("js:module"));
        assert!(filter.matches("js:gmodule"));
        assert!(!filter.matches("sjs:module"));
        assert!(!filter.is_any());

        assert!(KindFilter::any().matches("css:url"));
        assert!(KindFilter::new(["*"]).unwrap().is_any());
    }

    #[test]
    fn test_kind_filter_rejects_invalid_glob() {
        let err = KindFilter::new(["js:[*"]).unwrap_err();
        assert!(matches!(err, DeparseError::InvalidPattern { .. }));
    }

    #[test]
    fn test_glob_in_sorts_across_directories() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib/js");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("lodash-4.17.js"), "").unwrap();
        fs::write(lib.join("lodash-3.10.js"), "").unwrap();
        fs::write(temp.path().join("lodash-1.0.js"), "").unwrap();

        let dirs = subdirs(&[temp.path().to_path_buf()], &["lib/js".to_string()]);
        let found = glob_in(&dirs, &["lodash-*.js".to_string()]);
        assert_eq!(
            found,
            vec![
                temp.path().join("lib/js/lodash-3.10.js"),
                temp.path().join("lib/js/lodash-4.17.js"),
                temp.path().join("lodash-1.0.js"),
            ]
        );
    }

    #[test]
    fn test_subdirs_order() {
        let dirs = vec![PathBuf::from("/a"), PathBuf::from("/b")];
        let result = subdirs(&dirs, &["lib".to_string(), String::new()]);
        assert_eq!(
            result,
            vec![
                PathBuf::from("/a/lib"),
                PathBuf::from("/b/lib"),
                PathBuf::from("/a/"),
                PathBuf::from("/b/"),
                PathBuf::from("/a"),
                PathBuf::from("/b"),
            ]
        );
    }
}

//! Test utilities for deparse
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] - one-time tracing setup honouring `RUST_LOG`
//! - [`SourceTree`] - a throwaway directory of source files
//!
//! # Example
//!
//! ```rust,no_run
//! use deparse_cli::test_utils::SourceTree;
//!
//! let tree = SourceTree::new();
//! let app = tree.write("app.sjs", "@module app\n@import widgets\n");
//! tree.write("lib/sjs/widgets.sjs", "@module widgets\n");
//! assert!(app.exists());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::utils::{absolutize, normalize_path};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, else `RUST_LOG` when set, else stays silent.
///
/// ```bash
/// RUST_LOG=deparse_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}

/// A temporary directory of source files, removed on drop.
///
/// Every path it hands out is absolute and normalized, so it compares equal
/// to the candidates the resolver reports.
pub struct SourceTree {
    temp: TempDir,
}

impl SourceTree {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap_or_else(|e| panic!("Failed to create temp dir: {e}"));
        Self {
            temp,
        }
    }

    /// Absolute root of the tree. On Unix symlinks are resolved so the root
    /// matches what the process sees as its working directory inside it.
    pub fn root(&self) -> PathBuf {
        #[cfg(unix)]
        if let Ok(canonical) = self.temp.path().canonicalize() {
            return canonical;
        }
        normalize_path(&absolutize(self.temp.path()))
    }

    /// Absolute path of `relative` inside the tree. Nothing is created.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        normalize_path(&self.root().join(relative))
    }

    /// Writes `content` to `relative`, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics on any filesystem error.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content).unwrap_or_else(|e| panic!("Failed to write {}: {e}", path.display()));
        path
    }

    /// Creates an empty directory at `relative`.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap_or_else(|e| panic!("Failed to create {}: {e}", path.display()));
        path
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}

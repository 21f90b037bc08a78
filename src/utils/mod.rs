//! Shared path and filesystem helpers.
//!
//! # Modules
//!
//! - [`paths`] - lexical path normalization, composite paths and module names
//! - [`fs`] - source reading and atomic output writes
//!
//! # Example
//!
//! ```rust,no_run
//! use deparse_cli::utils::{normalize_path, split_composite};
//! use std::path::{Path, PathBuf};
//!
//! assert_eq!(normalize_path(Path::new("lib/./js/../css")), PathBuf::from("lib/css"));
//! assert_eq!(split_composite("a.js+b.js").map(|parts| parts.len()), Some(2));
//! ```

pub mod fs;
pub mod paths;

pub use fs::{atomic_write, ensure_dir, read_source};
pub use paths::{
    absolutize, context_dir, extension_of, module_name, normalize_path, relative_path,
    relative_to_source, split_composite,
};

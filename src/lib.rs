//! deparse - cross-format dependency extraction
//!
//! Extracts what source files provide and require across a family of
//! lightweight dialects (PAML templates, Sugar and JavaScript modules, CSS and
//! PCSS stylesheets, `.block` bundles, component folders and C headers),
//! resolves each symbolic requirement to files on disk and produces a
//! deterministic load order for a bundler or build step.
//!
//! # Architecture Overview
//!
//! ```text
//!   files ──> parser (per dialect) ──> tracker ──> load order / graph
//!                    ^                    │
//!                    └──── resolver <─────┘
//! ```
//!
//! - a **parser** turns one file into provides and requires, and knows how
//!   its dialect's names map to files
//! - the **resolver** runs those lookups against the search directories
//! - the **tracker** walks from file to file, building the node map
//!   (provided item → requirements) and the resolution cache
//! - the node map is ordered by [`tracker::sort_requires`] or exported by
//!   [`graph`]
//!
//! Each invocation rebuilds its state from scratch; nothing is persisted.
//!
//! # Core Modules
//!
//! - [`core`] - items, ordered item tables and the error taxonomy
//! - [`parser`] - dialect scanners, the extension registry and resolution
//!   heuristics
//! - [`resolver`] - name lookup across every registered dialect
//! - [`tracker`] - recursive traversal and load ordering
//! - [`graph`] - DOT and PlantUML export of the node map
//!
//! ## Supporting Modules
//! - [`cli`] - command-line interface
//! - [`config`] - optional `deparse.toml` search conventions
//! - [`constants`] - default conventions
//! - [`pattern`] - kind globs and directory globbing
//! - [`utils`] - path normalization and file helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use deparse_cli::tracker::Tracker;
//!
//! # fn example() -> Result<(), deparse_cli::core::DeparseError> {
//! let mut tracker = Tracker::default();
//! tracker.from_path("index.paml", true)?;
//! for item in tracker.load_order() {
//!     println!("{item}");
//! }
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod core;
pub mod parser;
pub mod resolver;
pub mod tracker;

// Output
pub mod cli;
pub mod graph;

// Supporting modules
pub mod config;
pub mod constants;
pub mod pattern;
pub mod utils;

// Test utilities (only compiled in test mode or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

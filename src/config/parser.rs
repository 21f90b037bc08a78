//! Generic configuration parsing utilities.
//!
//! Reads a TOML file into any `DeserializeOwned` type, attaching the file
//! path to both read and parse failures.
//!
//! ```rust,no_run
//! use deparse_cli::config::parse_config;
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Deserialize)]
//! struct Search {
//!     paths: Vec<String>,
//! }
//!
//! # fn example() -> anyhow::Result<()> {
//! let search: Search = parse_config(Path::new("search.toml"))?;
//! println!("{} search paths", search.paths.len());
//! # Ok(())
//! # }
//! ```
//!
//! Example error output:
//! ```text
//! Failed to parse config file: /path/to/deparse.toml
//! Caused by:
//!     invalid type: string "lib", expected a sequence
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or does
/// not match the shape of `T`. The path is part of the error context.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

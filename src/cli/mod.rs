//! Command-line interface for deparse.
//!
//! `deparse` has two modes that can be chained:
//!
//! - **tracking** (default): parse the given files and list what they
//!   require, in load order
//! - **finding** (`-f`): treat the arguments as symbolic names and print the
//!   files they resolve to; with `-l` or `-r` those files are then tracked
//!
//! ```bash
//! deparse -r app.sjs                 # everything app.sjs needs, in order
//! deparse -r -t 'js:*' -P app.sjs    # absolute paths of the scripts only
//! deparse -f jquery widgets          # where are these modules?
//! deparse -fr widgets                # find widgets, then track its files
//! deparse -r -g dot app.sjs > deps.dot
//! ```
//!
//! Arguments that cannot be read are reported and skipped; the process exits
//! with status 1 once the remaining arguments have been processed.

pub mod output;

#[cfg(test)]
mod tests;

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::graph::{GraphFormat, render};
use crate::parser::ParserRegistry;
use crate::pattern::KindFilter;
use crate::resolver::Resolver;
use crate::tracker::Tracker;
use output::{Output, PathStyle};

/// Serialization of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated record per line
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Runtime settings derived from the global flags.
///
/// Kept separate from [`Cli`] so the binary can set up logging before any
/// work starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,
    pub config_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(
    name = "deparse",
    about = "Lists the dependencies of PAML, Sugar, JavaScript, CSS and C files",
    version,
    long_about = "Extracts what each file provides and requires, resolves requirements to \
                  files on disk and prints them in load order."
)]
pub struct Cli {
    /// Files to extract dependencies from (names to resolve with --find).
    ///
    /// Sibling files can be joined with '+': lib/js/a.js+b.js
    #[arg(value_name = "FILE", required = true)]
    files: Vec<String>,

    /// Only list items whose kind matches one of these globs (e.g. 'js:*').
    #[arg(short = 't', long = "type", value_name = "GLOB", value_delimiter = ',')]
    types: Vec<String>,

    /// Recurse through the dependencies.
    #[arg(short, long)]
    recursive: bool,

    /// Show the path of each item relative to the working directory.
    #[arg(short = 'p', long = "path", conflicts_with = "abspath")]
    path: bool,

    /// Show the absolute path of each item.
    #[arg(short = 'P', long)]
    abspath: bool,

    /// Resolve the arguments as symbolic names instead of parsing files.
    #[arg(short, long)]
    find: bool,

    /// With --find, track the dependencies of the files found.
    #[arg(short, long, requires = "find")]
    list: bool,

    /// Write the result to FILE instead of standard output.
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    output: String,

    /// Output format of the listing.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the dependency graph instead of the listing.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    graph: Option<GraphFormat>,

    /// Log resolution details (same as RUST_LOG=debug).
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file to use instead of the default lookup.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };
        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    fn path_style(&self) -> PathStyle {
        if self.abspath {
            PathStyle::Absolute
        } else if self.path {
            PathStyle::Relative
        } else {
            PathStyle::Name
        }
    }

    /// Runs the command and writes its output.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or kind glob, when the output
    /// cannot be written, and after everything else has run when any
    /// argument could not be read.
    pub fn execute(self) -> Result<()> {
        let cli_config = self.build_config();
        let config = Config::load(cli_config.config_path.as_deref())?;
        let registry = ParserRegistry::from_config(&config)?;
        let filter = KindFilter::new(&self.types)?;
        let resolver = Resolver::new(registry, config);
        let style = self.path_style();
        let mut out = Output::new();

        let mut files: Vec<PathBuf> = self.files.iter().map(PathBuf::from).collect();
        let mut tracking = true;
        if self.find {
            let matches = resolver.find_names(&self.files, None);
            let chained = self.list || self.recursive;
            match self.format {
                OutputFormat::Json if !chained => out.json(&output::resolutions(&matches))?,
                _ => {
                    let listing = if chained { None } else { Some(style) };
                    files = out.matches(&matches, listing);
                }
            }
            tracking = chained;
        }

        let mut failures = 0;
        if tracking {
            let mut tracker = Tracker::new(resolver);
            for file in &files {
                debug!("Tracking {}", file.display());
                if tracker.from_path(file, self.recursive).is_err() {
                    failures += 1;
                }
            }

            if let Some(format) = self.graph {
                out.text(&render(tracker.node_map(), &filter, format));
            } else {
                match self.format {
                    OutputFormat::Json => out.json(&output::filtered_report(&tracker, &filter))?,
                    OutputFormat::Text => out.requires(&tracker, &filter, style),
                }
            }
        }

        out.finish(&self.output)?;
        if failures > 0 {
            bail!("{failures} of {} argument(s) could not be read", files.len());
        }
        Ok(())
    }
}

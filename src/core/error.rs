//! Error handling for deparse
//!
//! Two layers, as in the rest of the crate:
//! - [`DeparseError`] - strongly-typed failures raised by parsers, the
//!   resolver and the tracker
//! - [`ErrorContext`] - a wrapper adding a suggestion and details for the
//!   command line, produced by [`user_friendly_error`]
//!
//! # Severity
//!
//! None of the dependency-level errors abort a run. The tracker records
//! [`DeparseError::UnsupportedFormat`], [`DeparseError::UnreadablePath`] and
//! [`DeparseError::UnresolvedReference`] in its issue list and keeps going.
//! [`DeparseError::MalformedDeclaration`] aborts parsing of the one file that
//! contains it. Underlying I/O failures are returned to the immediate caller.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse_cli::core::{DeparseError, user_friendly_error};
//!
//! let error = DeparseError::UnreadablePath { path: "missing.paml".into() };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::item::Item;

/// The main error type for deparse operations.
#[derive(Error, Debug)]
pub enum DeparseError {
    /// No parser is registered for the file's extension.
    ///
    /// The file contributes no provides or requires.
    #[error("No parser registered for extension '{extension}' in {path}")]
    UnsupportedFormat {
        /// Lower-cased extension, empty when the file has none
        extension: String,
        /// File that was skipped
        path: PathBuf,
    },

    /// The path neither exists nor expands as a composite (`a.js+b.js`) path.
    #[error("Cannot read {path}: no such file and not a composite path")]
    UnreadablePath {
        /// The offending path as given
        path: PathBuf,
    },

    /// No parser and no fallback lookup could map the item to a location.
    #[error("Unresolved {item} required by {context}")]
    UnresolvedReference {
        /// The requirement that has no candidates
        item: Item,
        /// File that declared the requirement
        context: PathBuf,
    },

    /// A declaration is syntactically invalid (e.g. a broken attribute list).
    ///
    /// Treated as an authoring defect: parsing of that file stops.
    #[error("Malformed declaration in {path} at line {line}: {reason}")]
    MalformedDeclaration {
        /// File being parsed, `<text>` when parsing a string
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What is wrong with the declaration
        reason: String,
    },

    /// Configuration file could not be read or is invalid.
    #[error("Configuration error in {path}: {reason}")]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Underlying parse failure
        reason: String,
    },

    /// A kind filter is not a valid glob.
    #[error("Invalid kind pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern as given on the command line
        pattern: String,
        /// Why the glob crate rejected it
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl DeparseError {
    /// Short machine-readable tag for summaries and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "unsupported-format",
            Self::UnreadablePath { .. } => "unreadable-path",
            Self::UnresolvedReference { .. } => "unresolved-reference",
            Self::MalformedDeclaration { .. } => "malformed-declaration",
            Self::Config { .. } => "config",
            Self::InvalidPattern { .. } => "invalid-pattern",
            Self::Io(_) => "io",
            Self::Other { .. } => "other",
        }
    }
}

/// Error wrapper with user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DeparseError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: DeparseError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow,
    /// suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one
/// is known.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain = format!("{error:#}");
    match error.downcast::<DeparseError>() {
        Ok(deparse_error) => create_error_context(deparse_error),
        Err(other) => match other.downcast::<std::io::Error>() {
            Ok(io_error) => {
                let suggestion = match io_error.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        "Check the file permissions of the inputs and the output file"
                    }
                    std::io::ErrorKind::NotFound => {
                        "Check that the file or directory exists and the path is correct"
                    }
                    _ => "Re-run with --verbose to see which file failed",
                };
                ErrorContext::new(DeparseError::Io(io_error)).with_suggestion(suggestion)
            }
            Err(_) => ErrorContext::new(DeparseError::Other {
                message: chain,
            }),
        },
    }
}

fn create_error_context(error: DeparseError) -> ErrorContext {
    match &error {
        DeparseError::UnsupportedFormat { .. } => ErrorContext::new(error)
            .with_suggestion("Map the extension to a dialect in the [extensions] table of deparse.toml")
            .with_details("Known extensions: block, paml, sjs, js, pcss, css, c, cxx, c++, cpp, h, component"),
        DeparseError::UnreadablePath { .. } => ErrorContext::new(error)
            .with_suggestion("Check the path, or join sibling files with '+' (e.g. lib/a.js+b.js)"),
        DeparseError::UnresolvedReference { .. } => ErrorContext::new(error)
            .with_suggestion("Add the directory holding the dependency to [search] paths in deparse.toml"),
        DeparseError::MalformedDeclaration { .. } => ErrorContext::new(error)
            .with_suggestion("Attributes must be comma-separated name=value pairs")
            .with_details("Parsing of this file stopped at the malformed line"),
        DeparseError::Config { .. } => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax of the configuration file")
            .with_details("Configuration is read from --config, DEPARSE_CONFIG or ./deparse.toml"),
        DeparseError::InvalidPattern { .. } => ErrorContext::new(error)
            .with_suggestion("Kind filters are globs such as 'js:*' or '*:file'"),
        DeparseError::Io(_) | DeparseError::Other { .. } => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = DeparseError::UnresolvedReference {
            item: Item::new("js:module", "lodash"),
            context: PathBuf::from("src/app.js"),
        };
        assert_eq!(error.to_string(), "Unresolved js:module/lodash required by src/app.js");
        assert_eq!(error.code(), "unresolved-reference");

        let error = DeparseError::UnsupportedFormat {
            extension: "txt".to_string(),
            path: PathBuf::from("notes.txt"),
        };
        assert!(error.to_string().contains("'txt'"));
    }

    #[test]
    fn test_user_friendly_error_keeps_typed_error() {
        let error = anyhow::Error::from(DeparseError::UnreadablePath {
            path: PathBuf::from("a.js+b.js"),
        });
        let ctx = user_friendly_error(error);
        assert!(matches!(ctx.error, DeparseError::UnreadablePath { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_wraps_unknown_errors() {
        let ctx = user_friendly_error(anyhow::anyhow!("something broke"));
        assert_eq!(ctx.error.to_string(), "something broke");
        assert!(ctx.suggestion.is_none());
    }

    #[test]
    fn test_context_display_includes_suggestion() {
        let ctx = ErrorContext::new(DeparseError::Other {
            message: "boom".to_string(),
        })
        .with_suggestion("try again")
        .with_details("it broke");
        let text = ctx.to_string();
        assert!(text.contains("boom"));
        assert!(text.contains("Details: it broke"));
        assert!(text.contains("Suggestion: try again"));
    }
}

//! deparse CLI entry point
//!
//! Parses the command line, sets up logging on stderr, runs the command and
//! turns any failure into a user-friendly message with exit status 1.
//!
//! Logging honours `RUST_LOG` when set; otherwise `--verbose` selects
//! `debug`, `--quiet` selects `error` and the default is `warn`.

use anyhow::Result;
use clap::Parser;
use deparse_cli::cli;
use deparse_cli::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.build_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

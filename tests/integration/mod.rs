//! End-to-end tests for the `deparse` binary.
//!
//! Each test builds a small source tree in a temporary directory and runs
//! the binary from inside it, so relative arguments and the working
//! directory search behave as they do for a user.
//!
//! - `listing` - load order, path styles, kind filters and JSON output
//! - `find` - name lookup and chaining into the tracker
//! - `graph` - DOT and PlantUML export
//! - `config` - `deparse.toml` handling
//! - `errors` - exit status and messages for unreadable input

#[path = "../common/mod.rs"]
mod common;

mod config;
mod errors;
mod find;
mod graph;
mod listing;

//! Core types shared by every layer of deparse.
//!
//! - [`Item`] and [`Candidate`] - dependency identifiers and resolution hits
//! - [`ItemTable`] - insertion-ordered item maps ([`NodeMap`],
//!   [`ResolutionCache`])
//! - [`DeparseError`] - the error taxonomy, plus [`ErrorContext`] for
//!   user-facing rendering

pub mod error;
pub mod item;
pub mod table;

pub use error::{DeparseError, ErrorContext, user_friendly_error};
pub use item::{Candidate, Item, is_symbol_kind, kind_category, kind_dialect, kinds};
pub use table::{ItemTable, NodeMap, ResolutionCache, merge_unique};

//! Route label compaction.
//!
//! Button labels have a fixed width, so "origin → destination" descriptions
//! are shortened: known words and phrases come from substitution tables,
//! everything else is cut at a consonant boundary in proportion to the
//! space available.

mod abbreviate;
mod route_label;
mod tables;

pub use abbreviate::abbreviate;
pub use route_label::{compact, route_label};
pub use tables::{AbbreviationTables, TableError, WordCase};

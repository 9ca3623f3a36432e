//! Timetable rendering.
//!
//! Turns a fetched list of threads into chat messages: picks a layout from
//! the kinds of the two endpoints and the stations actually used, formats
//! one line per thread, and packs the lines into messages that fit the
//! transport's length limit.

mod config;
mod error;
mod layout;
mod line;
mod message;
mod split;

pub use config::RenderConfig;
pub use error::RenderError;
pub use layout::{Layout, RouteEnds};
pub use line::{escape_html, format_line};
pub use message::{TimetableContext, collect_threads, compose_messages, render};
pub use split::{split_lines, truncate_line};

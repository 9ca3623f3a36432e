//! Web layer for the timetable bot.
//!
//! Provides HTTP endpoints for point search, route labels and timetables.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

//! Domain types for the timetable bot.
//!
//! Points (stations and settlements) come from the directory; threads
//! (scheduled departures) come from the timetable API. Both enforce their
//! invariants at construction time.

mod error;
mod point;
mod thread;

pub use error::MalformedThread;
pub use point::{InvalidPointCode, Point, PointCode, PointId, PointKind};
pub use thread::{InvalidThreadUid, Price, StationRef, Thread, ThreadUid};

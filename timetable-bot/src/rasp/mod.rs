//! Yandex Rasp (timetable API) client.
//!
//! Key characteristics of the API:
//! - Points are addressed by Yandex codes: `s…` for stations, `c…` for
//!   settlements
//! - Times are ISO 8601 with the offset of the station they refer to
//! - `/search/` is paginated; `/stations_list/` returns everything at once

mod client;
mod convert;
mod error;
mod types;

pub use client::{RaspClient, RaspConfig};
pub use convert::{convert_search, convert_segment, convert_stations_list};
pub use error::RaspError;
pub use types::{
    Pagination, SearchResponse, Segment, StationInfo, StationsListResponse, ThreadInfo,
};

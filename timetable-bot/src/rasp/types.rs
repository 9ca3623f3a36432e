//! Yandex Rasp v3 response DTOs.
//!
//! These types map directly to the JSON the API returns. Most fields are
//! `Option` because the API omits them, sends `null`, or sends an empty
//! string depending on the trip.

use serde::Deserialize;

/// Response from `/search/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub pagination: Pagination,

    /// Echo of the request, with the resolved endpoints.
    pub search: Option<SearchEcho>,

    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchEcho {
    pub from: Option<StationInfo>,
    pub to: Option<StationInfo>,
    pub date: Option<String>,
}

/// One departure between the requested points.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub thread: Option<ThreadInfo>,

    pub from: Option<StationInfo>,
    pub to: Option<StationInfo>,

    /// ISO 8601 with offset, local to the station.
    pub departure: Option<String>,
    pub arrival: Option<String>,

    pub departure_platform: Option<String>,
    pub arrival_platform: Option<String>,
    pub departure_terminal: Option<String>,
    pub arrival_terminal: Option<String>,

    /// Travel time in seconds.
    pub duration: Option<f64>,

    /// Stop description, e.g. "везде" or "кроме: Фрязево".
    pub stops: Option<String>,

    pub start_date: Option<String>,

    pub tickets_info: Option<TicketsInfo>,
}

/// The trip a segment belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadInfo {
    pub uid: Option<String>,
    pub number: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,

    /// "express", "aeroexpress", or absent for regular trains.
    pub express_type: Option<String>,

    pub transport_type: Option<String>,
    pub transport_subtype: Option<TransportSubtype>,
    pub carrier: Option<Carrier>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransportSubtype {
    pub code: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Carrier {
    pub title: Option<String>,
}

/// A station or settlement as referenced by a segment.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInfo {
    pub code: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub popular_title: Option<String>,
    pub station_type: Option<String>,

    /// "station" or "settlement".
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketsInfo {
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub currency: Option<String>,
    pub price: Option<PlacePrice>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlacePrice {
    pub whole: u32,
    #[serde(default)]
    pub cents: u32,
}

// ============================================================================
// Station list
// ============================================================================

/// Response from `/stations_list/`: every country the service covers.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsListResponse {
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settlement {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub codes: Codes,
    #[serde(default)]
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Station {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub codes: Codes,
    pub station_type: Option<String>,
    pub transport_type: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Codes {
    pub yandex_code: Option<String>,
    pub esr_code: Option<String>,
}

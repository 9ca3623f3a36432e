//! Conversion from Rasp DTOs to domain types.
//!
//! Segments convert one at a time so a single bad record never sinks the
//! whole timetable; the caller decides what to do with the failures.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::debug;

use crate::domain::{
    MalformedThread, Point, PointCode, PointKind, Price, StationRef, Thread, ThreadUid,
};

use super::types::{Codes, SearchResponse, Segment, StationInfo, StationsListResponse};

/// Convert every segment of a search page.
pub fn convert_search(response: &SearchResponse) -> Vec<Result<Thread, MalformedThread>> {
    response.segments.iter().map(convert_segment).collect()
}

/// Convert one segment into a thread.
pub fn convert_segment(segment: &Segment) -> Result<Thread, MalformedThread> {
    let info = segment
        .thread
        .as_ref()
        .ok_or_else(|| MalformedThread::new(None, "missing thread"))?;

    let uid = non_empty(&info.uid)
        .ok_or_else(|| MalformedThread::new(None, "missing thread uid"))
        .and_then(|uid| {
            ThreadUid::new(uid).map_err(|e| MalformedThread::new(None, e.to_string()))
        })?;

    let malformed = |reason: String| MalformedThread::new(Some(uid.as_str()), reason);

    let title = non_empty(&info.title).ok_or_else(|| malformed("missing title".into()))?;
    let from = station_ref(segment.from.as_ref())
        .ok_or_else(|| malformed("missing departure station".into()))?;
    let to = station_ref(segment.to.as_ref())
        .ok_or_else(|| malformed("missing arrival station".into()))?;
    let departure = parse_time(&segment.departure, "departure").map_err(malformed)?;
    let arrival = parse_time(&segment.arrival, "arrival").map_err(malformed)?;

    let mut thread = Thread::new(
        uid.clone(),
        non_empty(&info.number).unwrap_or_default(),
        title,
        from,
        to,
        departure,
        arrival,
    )?;

    thread.short_title = non_empty(&info.short_title);
    thread.carrier = info.carrier.as_ref().and_then(|c| non_empty(&c.title));
    thread.transport_subtype = info
        .transport_subtype
        .as_ref()
        .and_then(|s| non_empty(&s.title));
    thread.express = non_empty(&info.express_type);
    thread.stops = segment.stops.clone().unwrap_or_default();
    thread.departure_platform = non_empty(&segment.departure_platform);
    thread.arrival_platform = non_empty(&segment.arrival_platform);
    thread.departure_terminal = non_empty(&segment.departure_terminal);
    thread.arrival_terminal = non_empty(&segment.arrival_terminal);

    if let Some(date) = segment.start_date.as_deref() {
        thread.start_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| malformed(format!("invalid start date: {date}")))?;
    }

    if let Some(secs) = segment.duration.filter(|d| d.is_finite() && *d >= 0.0) {
        thread.duration_secs = secs.round() as u32;
    }

    thread.price = segment
        .tickets_info
        .as_ref()
        .and_then(|info| info.places.iter().find(|p| p.price.is_some()))
        .and_then(|place| {
            place.price.map(|price| Price {
                whole: price.whole,
                cents: price.cents,
                currency: non_empty(&place.currency),
            })
        });

    Ok(thread)
}

/// Flatten the station list into directory points for one country.
///
/// A settlement is kept only if at least one of its stations serves
/// `transport_type`; those stations are kept alongside it. Points are
/// returned settlement first, then its stations, in API order.
pub fn convert_stations_list(
    response: &StationsListResponse,
    country: &str,
    transport_type: &str,
) -> Vec<Point> {
    let mut seen = HashSet::new();
    let mut points = Vec::new();

    let regions = response
        .countries
        .iter()
        .filter(|c| c.title == country)
        .flat_map(|c| &c.regions);

    for region in regions {
        for settlement in &region.settlements {
            let stations: Vec<_> = settlement
                .stations
                .iter()
                .filter(|s| s.transport_type.as_deref() == Some(transport_type))
                .filter(|s| !s.title.trim().is_empty())
                .collect();

            if stations.is_empty() {
                continue;
            }

            let settlement_point = (!settlement.title.trim().is_empty()).then(|| {
                Point::new(
                    PointKind::Settlement,
                    settlement.title.trim(),
                    &region.title,
                    point_code(&settlement.codes),
                )
            });

            let station_points = stations.into_iter().map(|station| {
                Point::new(
                    PointKind::Station,
                    station.title.trim(),
                    &region.title,
                    point_code(&station.codes),
                )
            });

            for point in settlement_point.into_iter().chain(station_points) {
                if seen.insert(point.id.clone()) {
                    points.push(point);
                }
            }
        }
    }

    points
}

fn point_code(codes: &Codes) -> Option<PointCode> {
    let raw = codes.yandex_code.as_deref()?;
    match PointCode::parse(raw) {
        Ok(code) => Some(code),
        Err(e) => {
            debug!(code = raw, error = %e, "ignoring unusable point code");
            None
        }
    }
}

fn station_ref(info: Option<&StationInfo>) -> Option<StationRef> {
    let info = info?;
    let title = non_empty(&info.short_title).or_else(|| non_empty(&info.title))?;
    Some(StationRef::new(non_empty(&info.code), title))
}

fn parse_time(value: &Option<String>, field: &str) -> Result<DateTime<FixedOffset>, String> {
    let raw = value
        .as_deref()
        .ok_or_else(|| format!("missing {field} time"))?;
    DateTime::parse_from_rfc3339(raw).map_err(|_| format!("invalid {field} time: {raw}"))
}

/// The API uses empty strings and `null` interchangeably.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

//! Choice of timetable layout.
//!
//! A settlement can be served by several stations, so a timetable between
//! settlements may mix departure and arrival stations. The layout decides
//! whether station names go once into the header or onto every line.

use std::borrow::Cow;

use crate::domain::{PointKind, StationRef, Thread};

use super::config::RenderConfig;
use super::line::escape_html;

/// Kinds of the two points a timetable was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEnds {
    pub origin: PointKind,
    pub destination: PointKind,
}

impl RouteEnds {
    pub fn new(origin: PointKind, destination: PointKind) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// How a list of threads is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Station to station: each line carries the route title.
    Direct { short_titles: bool },
    /// Every train arrives at the same station.
    OneArrival { station: String },
    /// Each line names its arrival station.
    ManyArrivals,
    /// Every train leaves from the same station.
    OneDeparture { station: String },
    /// Each line names its departure station.
    ManyDepartures,
    /// Settlement to settlement through one station pair.
    OneBoth { from: String, to: String },
    /// One departure station, various arrival stations.
    OneDepartureManyArrivals { from: String },
    /// Various departure stations, one arrival station.
    ManyDeparturesOneArrival { to: String },
    /// Both ends vary.
    ManyBoth,
}

impl Layout {
    /// Pick the layout for `threads` between points of the given kinds.
    pub fn choose(ends: RouteEnds, threads: &[Thread], config: &RenderConfig) -> Self {
        let one_from = single_station(threads.iter().map(|t| &t.from));
        let one_to = single_station(threads.iter().map(|t| &t.to));

        match (ends.origin, ends.destination, one_from, one_to) {
            (PointKind::Station, PointKind::Station, _, _) => Layout::Direct {
                short_titles: threads.len() > config.full_title_max_threads,
            },
            (PointKind::Station, PointKind::Settlement, _, Some(to)) => Layout::OneArrival {
                station: to.title.clone(),
            },
            (PointKind::Station, PointKind::Settlement, _, None) => Layout::ManyArrivals,
            (PointKind::Settlement, PointKind::Station, Some(from), _) => Layout::OneDeparture {
                station: from.title.clone(),
            },
            (PointKind::Settlement, PointKind::Station, None, _) => Layout::ManyDepartures,
            (PointKind::Settlement, PointKind::Settlement, Some(from), Some(to)) => {
                Layout::OneBoth {
                    from: from.title.clone(),
                    to: to.title.clone(),
                }
            }
            (PointKind::Settlement, PointKind::Settlement, Some(from), None) => {
                Layout::OneDepartureManyArrivals {
                    from: from.title.clone(),
                }
            }
            (PointKind::Settlement, PointKind::Settlement, None, Some(to)) => {
                Layout::ManyDeparturesOneArrival {
                    to: to.title.clone(),
                }
            }
            (PointKind::Settlement, PointKind::Settlement, None, None) => Layout::ManyBoth,
        }
    }

    /// Text shown above the lines; empty when the lines speak for
    /// themselves.
    pub fn header(&self) -> String {
        const EACH_ARRIVAL: &str = "В скобках указана станция прибытия.";
        const EACH_DEPARTURE: &str = "В скобках указана станция отправления.";

        match self {
            Layout::Direct { .. } => String::new(),
            Layout::OneArrival { station } => arrives_at(station),
            Layout::ManyArrivals => EACH_ARRIVAL.to_string(),
            Layout::OneDeparture { station } => departs_from(station),
            Layout::ManyDepartures => EACH_DEPARTURE.to_string(),
            Layout::OneBoth { from, to } => format!(
                "Отправление со станции <b>{}</b>, прибытие на станцию <b>{}</b>.",
                escape_html(from),
                escape_html(to)
            ),
            Layout::OneDepartureManyArrivals { from } => {
                format!("{} {EACH_ARRIVAL}", departs_from(from))
            }
            Layout::ManyDeparturesOneArrival { to } => {
                format!("{} {EACH_DEPARTURE}", arrives_at(to))
            }
            Layout::ManyBoth => "Внимание: поезда отправляются с разных станций и прибывают \
                 на разные станции. В скобках указаны станции отправления и прибытия."
                .to_string(),
        }
    }

    /// Parenthesised note for one line, if this layout has one.
    pub fn annotation<'a>(&self, thread: &'a Thread) -> Option<Cow<'a, str>> {
        match self {
            Layout::Direct { short_titles } => {
                Some(Cow::Borrowed(thread.route_title(*short_titles)))
            }
            Layout::OneArrival { .. } | Layout::OneDeparture { .. } | Layout::OneBoth { .. } => {
                None
            }
            Layout::ManyArrivals | Layout::OneDepartureManyArrivals { .. } => {
                Some(Cow::Borrowed(thread.to.title.as_str()))
            }
            Layout::ManyDepartures | Layout::ManyDeparturesOneArrival { .. } => {
                Some(Cow::Borrowed(thread.from.title.as_str()))
            }
            Layout::ManyBoth => Some(Cow::Owned(format!(
                "{} → {}",
                thread.from.title, thread.to.title
            ))),
        }
    }
}

fn arrives_at(station: &str) -> String {
    format!(
        "Все поезда прибывают на станцию <b>{}</b>.",
        escape_html(station)
    )
}

fn departs_from(station: &str) -> String {
    format!(
        "Все поезда отправляются со станции <b>{}</b>.",
        escape_html(station)
    )
}

/// The station shared by every item, or `None` when they differ (or there
/// are none).
fn single_station<'a>(mut stations: impl Iterator<Item = &'a StationRef>) -> Option<&'a StationRef> {
    let first = stations.next()?;
    stations
        .all(|s| s.identity() == first.identity())
        .then_some(first)
}

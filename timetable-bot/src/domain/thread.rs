//! Scheduled departures ("threads").
//!
//! A `Thread` is one trip instance between two points on a given date, as
//! returned by the timetable API. Construction validates the timing
//! invariant, so renderers can trust `departure <= arrival`.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};

use super::error::MalformedThread;

/// Error returned when a thread UID is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid thread UID: {reason}")]
pub struct InvalidThreadUid {
    reason: &'static str,
}

/// Unique identifier of a physical departure.
///
/// UIDs are opaque; the only validation is that they are non-empty.
///
/// # Examples
///
/// ```
/// use timetable_bot::domain::ThreadUid;
///
/// let uid = ThreadUid::new("6001_0_9600213_g24_4".to_string()).unwrap();
/// assert_eq!(uid.as_str(), "6001_0_9600213_g24_4");
///
/// assert!(ThreadUid::new("".to_string()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ThreadUid(String);

impl ThreadUid {
    pub fn new(s: String) -> Result<Self, InvalidThreadUid> {
        if s.trim().is_empty() {
            return Err(InvalidThreadUid {
                reason: "thread UID cannot be empty",
            });
        }
        Ok(ThreadUid(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ThreadUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThreadUid({})", self.0)
    }
}

impl fmt::Display for ThreadUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One end of a thread: the physical station a train leaves or reaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRef {
    /// External station code, when the API reports one.
    pub code: Option<String>,
    /// Short display title.
    pub title: String,
}

impl StationRef {
    pub fn new(code: Option<String>, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
        }
    }

    /// Key identifying the physical station: its code, or the title when
    /// no code is known.
    pub fn identity(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.title)
    }
}

/// Ticket price in the smallest sensible units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub whole: u32,
    pub cents: u32,
    pub currency: Option<String>,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cents == 0 {
            write!(f, "{}", self.whole)?;
        } else {
            write!(f, "{}.{:02}", self.whole, self.cents)?;
        }
        if let Some(currency) = &self.currency {
            write!(f, " {currency}")?;
        }
        Ok(())
    }
}

/// A scheduled departure between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub uid: ThreadUid,
    /// Trip number, e.g. "6001".
    pub number: String,
    /// Full route title, e.g. "Москва (Курский вокзал) — Петушки".
    pub title: String,
    /// Short route title, when the API has one.
    pub short_title: Option<String>,
    pub carrier: Option<String>,
    pub transport_subtype: Option<String>,
    /// Express marker ("express", "aeroexpress"); `None` for regular trains.
    pub express: Option<String>,
    pub from: StationRef,
    pub to: StationRef,
    departure: DateTime<FixedOffset>,
    arrival: DateTime<FixedOffset>,
    /// Calendar date the trip starts on.
    pub start_date: NaiveDate,
    /// Stop-list description ("везде", "кроме: ...").
    pub stops: String,
    pub departure_platform: Option<String>,
    pub arrival_platform: Option<String>,
    pub departure_terminal: Option<String>,
    pub arrival_terminal: Option<String>,
    pub duration_secs: u32,
    pub price: Option<Price>,
}

impl Thread {
    /// Creates a thread with the required fields; optional fields start
    /// empty.
    ///
    /// Fails if the train would arrive before it departs.
    pub fn new(
        uid: ThreadUid,
        number: impl Into<String>,
        title: impl Into<String>,
        from: StationRef,
        to: StationRef,
        departure: DateTime<FixedOffset>,
        arrival: DateTime<FixedOffset>,
    ) -> Result<Self, MalformedThread> {
        if departure > arrival {
            return Err(MalformedThread::new(
                Some(uid.as_str()),
                "departure is after arrival",
            ));
        }

        let duration_secs = u32::try_from((arrival - departure).num_seconds()).unwrap_or(0);

        Ok(Self {
            uid,
            number: number.into(),
            title: title.into(),
            short_title: None,
            carrier: None,
            transport_subtype: None,
            express: None,
            from,
            to,
            departure,
            arrival,
            start_date: departure.date_naive(),
            stops: String::new(),
            departure_platform: None,
            arrival_platform: None,
            departure_terminal: None,
            arrival_terminal: None,
            duration_secs,
            price: None,
        })
    }

    pub fn departure(&self) -> DateTime<FixedOffset> {
        self.departure
    }

    pub fn arrival(&self) -> DateTime<FixedOffset> {
        self.arrival
    }

    pub fn is_express(&self) -> bool {
        self.express.is_some()
    }

    /// Route title to show, preferring the short one when asked and
    /// available.
    pub fn route_title(&self, short: bool) -> &str {
        match (&self.short_title, short) {
            (Some(short_title), true) => short_title,
            _ => &self.title,
        }
    }
}

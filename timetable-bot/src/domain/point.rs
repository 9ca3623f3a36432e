//! Directory points: stations and settlements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid external point code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point code: {reason}")]
pub struct InvalidPointCode {
    reason: &'static str,
}

/// An external timetable-system code for a point (e.g. "s9600213", "c213").
///
/// Codes are non-empty ASCII alphanumeric strings. Only points that carry a
/// code can be scheduled against.
///
/// # Examples
///
/// ```
/// use timetable_bot::domain::PointCode;
///
/// let code = PointCode::parse("s9600213").unwrap();
/// assert_eq!(code.as_str(), "s9600213");
///
/// assert!(PointCode::parse("").is_err());
/// assert!(PointCode::parse("s 96").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PointCode(String);

impl PointCode {
    /// Parse a point code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidPointCode> {
        if s.is_empty() {
            return Err(InvalidPointCode {
                reason: "code cannot be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidPointCode {
                reason: "must be ASCII letters and digits",
            });
        }

        Ok(PointCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PointCode {
    type Error = InvalidPointCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PointCode::parse(&s)
    }
}

impl From<PointCode> for String {
    fn from(code: PointCode) -> Self {
        code.0
    }
}

impl fmt::Debug for PointCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointCode({})", self.0)
    }
}

impl fmt::Display for PointCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque, stable directory identifier of a point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        PointId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What sort of place a point is.
///
/// The derived ordering puts stations before settlements, which is the
/// order the matcher presents them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Station,
    Settlement,
}

impl PointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointKind::Station => "station",
            PointKind::Settlement => "settlement",
        }
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station or settlement that can be a trip endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub kind: PointKind,
    pub title: String,
    pub region: String,
    pub code: Option<PointCode>,
}

impl Point {
    /// Create a point; the id is derived from the code when there is one.
    pub fn new(
        kind: PointKind,
        title: impl Into<String>,
        region: impl Into<String>,
        code: Option<PointCode>,
    ) -> Self {
        let title = title.into();
        let region = region.into();
        let id = match &code {
            Some(code) => PointId::new(code.as_str()),
            None => PointId::new(format!("{kind}/{region}/{title}")),
        };

        Self {
            id,
            kind,
            title,
            region,
            code,
        }
    }

    /// Whether timetables can be requested for this point.
    pub fn is_schedulable(&self) -> bool {
        self.code.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(PointCode::parse("s9600213").is_ok());
        assert!(PointCode::parse("c213").is_ok());
        assert!(PointCode::parse("9600213").is_ok());
    }

    #[test]
    fn reject_empty_code() {
        assert!(PointCode::parse("").is_err());
    }

    #[test]
    fn reject_non_alphanumeric_code() {
        assert!(PointCode::parse("s96 00").is_err());
        assert!(PointCode::parse("s96-00").is_err());
        assert!(PointCode::parse("с213").is_err());
    }

    #[test]
    fn code_display_and_debug() {
        let code = PointCode::parse("c213").unwrap();
        assert_eq!(format!("{}", code), "c213");
        assert_eq!(format!("{:?}", code), "PointCode(c213)");
    }

    #[test]
    fn code_serde_validates() {
        let code: PointCode = serde_json::from_str("\"s123\"").unwrap();
        assert_eq!(code.as_str(), "s123");
        assert!(serde_json::from_str::<PointCode>("\"\"").is_err());
    }

    #[test]
    fn stations_order_before_settlements() {
        assert!(PointKind::Station < PointKind::Settlement);
    }

    #[test]
    fn id_from_code() {
        let point = Point::new(
            PointKind::Settlement,
            "Москва",
            "Москва и Московская область",
            Some(PointCode::parse("c213").unwrap()),
        );
        assert_eq!(point.id.as_str(), "c213");
        assert!(point.is_schedulable());
    }

    #[test]
    fn id_without_code() {
        let point = Point::new(PointKind::Station, "Разъезд 9 км", "Тверская область", None);
        assert_eq!(point.id.as_str(), "station/Тверская область/Разъезд 9 км");
        assert!(!point.is_schedulable());
    }

    #[test]
    fn point_serde_roundtrip() {
        let point = Point::new(
            PointKind::Station,
            "Петушки",
            "Владимирская область",
            Some(PointCode::parse("s9601677").unwrap()),
        );
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"kind\":\"station\""));
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any ASCII alphanumeric string parses and round-trips
        #[test]
        fn alphanumeric_roundtrip(s in "[a-z0-9]{1,12}") {
            let code = PointCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Whitespace anywhere is rejected
        #[test]
        fn whitespace_rejected(a in "[a-z0-9]{0,5}", b in "[a-z0-9]{0,5}") {
            let s = format!("{a} {b}");
            prop_assert!(PointCode::parse(&s).is_err());
        }
    }
}

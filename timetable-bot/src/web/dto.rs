//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Point, PointKind};
use crate::matcher::PageAction;
use crate::texts::page_action_caption;

/// Request to search points by name.
#[derive(Debug, Deserialize)]
pub struct PointSearchRequest {
    /// What the user typed
    pub q: String,

    /// 1-based page of results (defaults to 1)
    pub page: Option<usize>,
}

/// One page of matching points, ready to be shown as buttons.
#[derive(Debug, Serialize)]
pub struct PointSearchResponse {
    /// Prompt to show above the buttons
    pub text: String,

    pub page: usize,
    pub total_pages: usize,
    pub points: Vec<PointResult>,

    /// Extra button under the points
    pub action: PageActionResult,
}

/// A point in search results.
#[derive(Debug, Serialize)]
pub struct PointResult {
    pub id: String,
    pub kind: PointKind,
    pub title: String,
    pub region: String,
    /// Timetable code; absent for points that cannot be scheduled
    pub code: Option<String>,
}

impl From<&Point> for PointResult {
    fn from(point: &Point) -> Self {
        Self {
            id: point.id.to_string(),
            kind: point.kind,
            title: point.title.clone(),
            region: point.region.clone(),
            code: point.code.as_ref().map(|c| c.as_str().to_string()),
        }
    }
}

/// The button under a page of points.
#[derive(Debug, Serialize)]
pub struct PageActionResult {
    /// "more" or "none_of_these"
    pub kind: &'static str,
    pub caption: &'static str,
}

impl From<PageAction> for PageActionResult {
    fn from(action: PageAction) -> Self {
        let kind = match action {
            PageAction::More => "more",
            PageAction::NoneOfThese => "none_of_these",
        };
        Self {
            kind,
            caption: page_action_caption(action),
        }
    }
}

/// Request to compact a route description into a label.
#[derive(Debug, Deserialize)]
pub struct RouteLabelRequest {
    /// Origin title
    pub from: String,

    /// Destination title
    pub to: String,

    /// Maximum label length (defaults to the configured button width)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RouteLabelResponse {
    pub label: String,
}

/// Request for a timetable between two directory points.
#[derive(Debug, Deserialize)]
pub struct TimetableRequest {
    /// Origin point id
    pub from: String,

    /// Destination point id
    pub to: String,

    /// Date in YYYY-MM-DD format (defaults to today)
    pub date: Option<String>,
}

/// A timetable as chat messages, in sending order.
#[derive(Debug, Serialize)]
pub struct TimetableResponse {
    pub messages: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message, suitable for showing to the user
    pub error: String,
}

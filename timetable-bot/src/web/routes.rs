//! HTTP route handlers.
//!
//! This is the surface a chat transport calls: it turns what the user typed
//! or tapped into message texts and button data.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Local, NaiveDate};
use tracing::{error, warn};

use crate::compact::route_label;
use crate::domain::{MalformedThread, Point, PointId, Thread};
use crate::matcher::{MatchError, PageAction, lookup_strictness, prepare_query, select};
use crate::rasp::RaspError;
use crate::render::{
    RenderConfig, RenderError, RouteEnds, TimetableContext, collect_threads, compose_messages,
    escape_html,
};
use crate::texts::{ChoosePointText, NoDeparturesText, NotFoundText, TypeMoreText};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/points/search", get(search_points))
        .route("/route/label", get(label_route))
        .route("/timetable", get(timetable))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search the directory for points matching what the user typed.
async fn search_points(
    State(state): State<AppState>,
    Query(req): Query<PointSearchRequest>,
) -> Result<Json<PointSearchResponse>, AppError> {
    let config = &state.match_config;

    let query = prepare_query(&req.q, config).map_err(|e| match_error(e, &req.q))?;
    let strictness = lookup_strictness(&query, config);
    let candidates = state
        .directory
        .lookup(&query, strictness, config.lookup_limit)
        .await;

    let pages = select(&req.q, candidates, config).map_err(|e| match_error(e, &req.q))?;
    let total_pages = pages.len();
    let page = req.page.unwrap_or(1).max(1);

    let points = pages.get(page - 1).ok_or_else(|| AppError::NotFound {
        message: format!("page {page} of {total_pages} does not exist"),
    })?;

    let text = render_text(ChoosePointText { page, total_pages })?;

    Ok(Json(PointSearchResponse {
        text,
        page,
        total_pages,
        points: points.iter().map(PointResult::from).collect(),
        action: PageAction::for_page(page - 1, total_pages).into(),
    }))
}

/// Compact an "origin → destination" description to fit a button.
async fn label_route(
    State(state): State<AppState>,
    Query(req): Query<RouteLabelRequest>,
) -> Json<RouteLabelResponse> {
    let limit = req.limit.unwrap_or(state.label_limit);
    let label = route_label(&req.from, &req.to, limit, &state.tables);
    Json(RouteLabelResponse { label })
}

/// Timetable between two directory points as ready-to-send messages.
async fn timetable(
    State(state): State<AppState>,
    Query(req): Query<TimetableRequest>,
) -> Result<Json<TimetableResponse>, AppError> {
    let date = match req.date.as_deref() {
        Some(raw) => {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
                message: format!("Invalid date: {raw}"),
            })?
        }
        None => Local::now().date_naive(),
    };

    let from = resolve_point(&state, &req.from).await?;
    let to = resolve_point(&state, &req.to).await?;

    let (Some(from_code), Some(to_code)) = (&from.code, &to.code) else {
        return Err(AppError::BadRequest {
            message: "No timetable is available for this point".to_string(),
        });
    };

    let records = state.rasp.schedule(from_code, to_code, date).await?;

    let route = format!("{}{}{}", from.title, state.tables.separator(), to.title);
    let messages = timetable_messages(
        records.iter().cloned(),
        RouteEnds::new(from.kind, to.kind),
        TimetableContext {
            route: &route,
            date,
        },
        &state.render_config,
    )?;

    Ok(Json(TimetableResponse { messages }))
}

/// Render fetched records, falling back to the "no departures" text when
/// none of them can be shown.
fn timetable_messages(
    records: impl IntoIterator<Item = Result<Thread, MalformedThread>>,
    ends: RouteEnds,
    context: TimetableContext<'_>,
    config: &RenderConfig,
) -> Result<Vec<String>, RenderError> {
    let threads = match collect_threads(records) {
        Ok(threads) => threads,
        Err(RenderError::NoRenderableThreads) => {
            let date = context.date.format("%d.%m.%Y").to_string();
            let route = escape_html(context.route);
            let text = NoDeparturesText {
                route: &route,
                date: &date,
            }
            .render()?;
            return Ok(vec![text]);
        }
        Err(e) => return Err(e),
    };

    compose_messages(&threads, ends, context, config)
}

async fn resolve_point(state: &AppState, id: &str) -> Result<Point, AppError> {
    state
        .directory
        .get(&PointId::new(id))
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown point: {id}"),
        })
}

fn render_text(template: impl Template) -> Result<String, AppError> {
    template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

/// Map a matcher error to the text the user should see.
fn match_error(e: MatchError, raw_query: &str) -> AppError {
    match e {
        MatchError::InputTooShort { min } => match render_text(TypeMoreText { min }) {
            Ok(message) => AppError::BadRequest { message },
            Err(e) => e,
        },
        MatchError::NoMatch => {
            let query = escape_html(raw_query.trim());
            match render_text(NotFoundText { query: &query }) {
                Ok(message) => AppError::NotFound { message },
                Err(e) => e,
            }
        }
        MatchError::UnclassifiedCandidate { .. } => AppError::Internal {
            message: e.to_string(),
        },
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RaspError> for AppError {
    fn from(e: RaspError) -> Self {
        match e {
            RaspError::UnknownPoint(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

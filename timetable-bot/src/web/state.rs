//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedRaspClient;
use crate::compact::AbbreviationTables;
use crate::directory::PointDirectory;
use crate::matcher::MatchConfig;
use crate::render::RenderConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached Rasp API client
    pub rasp: Arc<CachedRaspClient>,

    /// Stations and settlements users can pick from
    pub directory: PointDirectory,

    /// Abbreviations for route labels
    pub tables: Arc<AbbreviationTables>,

    /// Point search configuration
    pub match_config: Arc<MatchConfig>,

    /// Timetable rendering configuration
    pub render_config: Arc<RenderConfig>,

    /// Default length limit for route labels
    pub label_limit: usize,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        rasp: CachedRaspClient,
        directory: PointDirectory,
        tables: AbbreviationTables,
        match_config: MatchConfig,
        render_config: RenderConfig,
        label_limit: usize,
    ) -> Self {
        Self {
            rasp: Arc::new(rasp),
            directory,
            tables: Arc::new(tables),
            match_config: Arc::new(match_config),
            render_config: Arc::new(render_config),
            label_limit,
        }
    }
}

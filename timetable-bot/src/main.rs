use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use timetable_bot::cache::{CacheConfig, CachedRaspClient};
use timetable_bot::compact::AbbreviationTables;
use timetable_bot::directory::{DirectoryCache, DirectoryCacheConfig, PointDirectory, PointSource};
use timetable_bot::matcher::MatchConfig;
use timetable_bot::rasp::{RaspClient, RaspConfig};
use timetable_bot::render::RenderConfig;
use timetable_bot::settings::Settings;
use timetable_bot::web::{AppState, create_router};

/// How often to refresh the point directory (24 hours).
const DIRECTORY_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("timetable_bot=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    if settings.api_key.is_empty() {
        warn!("RASP_API_KEY not set. API calls will fail.");
    }

    let client = RaspClient::new(RaspConfig::new(&settings.api_key))?;

    // Load points from disk or the API (fail fast if neither works)
    let source = PointSource {
        client: client.clone(),
        country: settings.country.clone(),
        cache: Some(DirectoryCache::new(DirectoryCacheConfig::new(
            &settings.directory_cache_path,
        ))),
    };
    let directory = PointDirectory::load(source).await?;
    info!(count = directory.len().await, "point directory ready");

    // Spawn background task to refresh the directory daily
    let directory_refresh = directory.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(DIRECTORY_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match directory_refresh.refresh().await {
                Ok(count) => info!(count, "refreshed point directory"),
                Err(e) => warn!(error = %e, "failed to refresh point directory"),
            }
        }
    });

    let state = AppState::new(
        CachedRaspClient::new(client, &CacheConfig::default()),
        directory,
        AbbreviationTables::russian()?,
        MatchConfig::default(),
        RenderConfig::default().with_max_block_length(settings.max_message_length),
        settings.button_label_limit,
    );

    let app = create_router(state);

    info!(addr = %settings.bind_addr, "timetable bot listening");
    info!("  GET /health");
    info!("  GET /points/search?q=&page=");
    info!("  GET /route/label?from=&to=&limit=");
    info!("  GET /timetable?from=&to=&date=");

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

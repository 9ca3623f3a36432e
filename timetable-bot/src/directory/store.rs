//! In-memory point directory.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{Point, PointId};
use crate::matcher::{Strictness, normalize_title};
use crate::rasp::RaspClient;

use super::cache::DirectoryCache;
use super::error::DirectoryError;

/// Where a directory gets its points from.
#[derive(Debug, Clone)]
pub struct PointSource {
    pub client: RaspClient,
    /// Country whose points are kept.
    pub country: String,
    /// Optional disk copy of the last fetch.
    pub cache: Option<DirectoryCache>,
}

/// Thread-safe point directory with support for background refresh.
#[derive(Clone)]
pub struct PointDirectory {
    points: Arc<RwLock<Vec<Point>>>,
    source: Option<Arc<PointSource>>,
}

impl PointDirectory {
    /// A fixed directory that never refreshes.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points: Arc::new(RwLock::new(points)),
            source: None,
        }
    }

    /// Load the directory from the disk cache, falling back to the API.
    ///
    /// Fails only if the cache is unusable and the API is unreachable.
    pub async fn load(source: PointSource) -> Result<Self, DirectoryError> {
        let cached = source.cache.as_ref().and_then(|c| c.load(&source.country));

        let points = match cached {
            Some(points) => {
                info!(count = points.len(), "loaded points from disk cache");
                points
            }
            None => fetch(&source).await?,
        };

        Ok(Self {
            points: Arc::new(RwLock::new(points)),
            source: Some(Arc::new(source)),
        })
    }

    /// Points whose normalized title equals (`Strict`) or contains (`Loose`)
    /// the normalized `query`, at most `limit` of them, in directory order.
    pub async fn lookup(&self, query: &str, strictness: Strictness, limit: usize) -> Vec<Point> {
        let guard = self.points.read().await;
        guard
            .iter()
            .filter(|p| {
                let title = normalize_title(&p.title);
                match strictness {
                    Strictness::Strict => title == query,
                    Strictness::Loose => title.contains(query),
                }
            })
            .take(limit)
            .cloned()
            .collect()
    }

    /// Look up a point by id.
    pub async fn get(&self, id: &PointId) -> Option<Point> {
        let guard = self.points.read().await;
        guard.iter().find(|p| &p.id == id).cloned()
    }

    /// Get the number of points in the directory.
    pub async fn len(&self) -> usize {
        self.points.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.points.read().await.is_empty()
    }

    /// Refetch the points from the API.
    ///
    /// On success, replaces the current points. On failure, the existing
    /// points are preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, DirectoryError> {
        let source = self.source.as_ref().ok_or(DirectoryError::NoSource)?;
        let points = fetch(source).await?;
        let count = points.len();

        *self.points.write().await = points;

        Ok(count)
    }
}

async fn fetch(source: &PointSource) -> Result<Vec<Point>, DirectoryError> {
    let points = source.client.points(&source.country).await?;

    if let Some(cache) = &source.cache
        && let Err(e) = cache.save(&source.country, &points)
    {
        warn!(error = %e, path = %cache.path().display(), "failed to save points cache");
    }

    Ok(points)
}

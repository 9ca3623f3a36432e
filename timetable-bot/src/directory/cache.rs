//! Disk cache for the point directory.
//!
//! The station list is several megabytes and changes rarely; keeping a copy
//! on disk saves fetching it on every restart.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::domain::Point;

use super::error::DirectoryError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached points with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedPoints {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// Country the points were filtered for.
    country: String,
    points: Vec<Point>,
}

/// Configuration for the directory disk cache.
#[derive(Debug, Clone)]
pub struct DirectoryCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains valid.
    pub ttl: Duration,
}

impl DirectoryCacheConfig {
    /// Create a new cache config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for DirectoryCacheConfig {
    fn default() -> Self {
        Self::new("points_cache.json")
    }
}

/// Disk cache for directory points.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    config: DirectoryCacheConfig,
}

impl DirectoryCache {
    pub fn new(config: DirectoryCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load the points cached for `country`.
    ///
    /// Returns `None` if the cache doesn't exist, is unreadable, has expired
    /// or was written for another country.
    pub fn load(&self, country: &str) -> Option<Vec<Point>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedPoints = serde_json::from_str(&contents).ok()?;

        if cached.country != country {
            return None;
        }

        let age_secs = unix_now().ok()?.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.points)
    }

    /// Save points to the cache, creating parent directories as needed.
    pub fn save(&self, country: &str, points: &[Point]) -> Result<(), DirectoryError> {
        let cached = CachedPoints {
            cached_at_secs: unix_now()?,
            country: country.to_string(),
            points: points.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| DirectoryError::Cache {
                message: format!("failed to create cache directory: {e}"),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| DirectoryError::Cache {
            message: format!("failed to serialize cache: {e}"),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| DirectoryError::Cache {
            message: format!("failed to write cache file: {e}"),
        })
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn unix_now() -> Result<u64, DirectoryError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| DirectoryError::Cache {
            message: "system time before unix epoch".to_string(),
        })
}

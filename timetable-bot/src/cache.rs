//! Caching layer for Rasp schedule responses.
//!
//! Schedules are requested per (origin, destination, date); the same pair
//! is asked for repeatedly while a user pages through dates, and the API
//! counts every call against a daily quota. Entries keep the converted
//! records, malformed ones included, so each request logs its own drops.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tracing::{debug, error, warn};

use crate::alert::{AlertConfig, ErrorWindow};
use crate::domain::{MalformedThread, PointCode, Thread};
use crate::rasp::{RaspClient, RaspError};

/// Cache key for schedules: (origin code, destination code, date).
type ScheduleKey = (PointCode, PointCode, NaiveDate);

/// Cached schedule entry.
pub type ScheduleEntry = Arc<Vec<Result<Thread, MalformedThread>>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// When upstream failures become worth an alert.
    pub alert: AlertConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
            alert: AlertConfig::default(),
        }
    }
}

/// Rasp client with caching.
///
/// Wraps a `RaspClient`, caches schedule responses and watches the upstream
/// error rate.
pub struct CachedRaspClient {
    client: RaspClient,
    schedules: MokaCache<ScheduleKey, ScheduleEntry>,
    errors: Mutex<ErrorWindow>,
}

impl CachedRaspClient {
    /// Create a new cached client.
    pub fn new(client: RaspClient, config: &CacheConfig) -> Self {
        let schedules = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            schedules,
            errors: Mutex::new(ErrorWindow::new(config.alert.clone())),
        }
    }

    /// Get the schedule between two points on a date, using the cache if
    /// available.
    pub async fn schedule(
        &self,
        from: &PointCode,
        to: &PointCode,
        date: NaiveDate,
    ) -> Result<ScheduleEntry, RaspError> {
        let key = (from.clone(), to.clone(), date);

        if let Some(cached) = self.schedules.get(&key).await {
            debug!(from = from.as_str(), to = to.as_str(), %date, "schedule cache hit");
            return Ok(cached);
        }

        let records = match self.client.search(from, to, date).await {
            Ok(records) => records,
            Err(e) => {
                self.record_failure(&e);
                return Err(e);
            }
        };

        let entry = Arc::new(records);
        self.schedules.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &RaspClient {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.schedules.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.schedules.invalidate_all();
    }

    fn record_failure(&self, err: &RaspError) {
        warn!(error = %err, "schedule request failed");

        if !err.is_service_failure() {
            return;
        }

        let alert = self
            .errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(Instant::now());
        if alert {
            error!(error = %err, "Rasp API is failing repeatedly");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasp::RaspConfig;

    fn cached() -> CachedRaspClient {
        let client = RaspClient::new(RaspConfig::new("test-key")).unwrap();
        CachedRaspClient::new(client, &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 1000);
        assert_eq!(config.alert.threshold, 5);
    }

    #[test]
    fn cache_creation() {
        assert_eq!(cached().cache_entry_count(), 0);
    }

    #[tokio::test]
    async fn serves_cached_schedule() {
        let cache = cached();
        let from = PointCode::parse("s2000001").unwrap();
        let to = PointCode::parse("s9601677").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let entry: ScheduleEntry = Arc::new(vec![Err(MalformedThread::new(None, "missing uid"))]);
        cache
            .schedules
            .insert((from.clone(), to.clone(), date), entry.clone())
            .await;

        // Served without touching the network
        let got = cache.schedule(&from, &to, date).await.unwrap();
        assert!(Arc::ptr_eq(&got, &entry));
    }

    #[test]
    fn failures_reach_the_error_window() {
        let cache = cached();
        cache.record_failure(&RaspError::RateLimited);
        cache.record_failure(&RaspError::UnknownPoint("c0".into()));

        let window = cache.errors.lock().unwrap();
        assert_eq!(window.len(), 1);
    }
}

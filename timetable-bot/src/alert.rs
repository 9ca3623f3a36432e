//! Error-rate alerting for the upstream API.
//!
//! A burst of failures is worth one loud log line, not one per request.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Configuration for the error window.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Failures within `window` that trigger an alert.
    pub threshold: usize,
    /// Sliding window length.
    pub window: Duration,
    /// Minimum gap between two alerts.
    pub cooldown: Duration,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: 5,
            window: Duration::from_secs(60),
            cooldown: Duration::from_secs(15 * 60),
        }
    }
}

/// Sliding window over recent failure instants.
#[derive(Debug)]
pub struct ErrorWindow {
    config: AlertConfig,
    failures: VecDeque<Instant>,
    last_alert: Option<Instant>,
}

impl ErrorWindow {
    pub fn new(config: AlertConfig) -> Self {
        let capacity = config.threshold.max(1);
        Self {
            config,
            failures: VecDeque::with_capacity(capacity),
            last_alert: None,
        }
    }

    /// Record a failure at `now`. Returns `true` when an alert should be
    /// raised: the last `threshold` failures all fall within the window and
    /// no alert was raised during the cooldown.
    pub fn record(&mut self, now: Instant) -> bool {
        let threshold = self.config.threshold.max(1);

        if self.failures.len() == threshold {
            self.failures.pop_front();
        }
        self.failures.push_back(now);

        if self.failures.len() < threshold {
            return false;
        }

        let oldest = self.failures.front().copied().unwrap_or(now);
        if now.saturating_duration_since(oldest) > self.config.window {
            return false;
        }

        let cooled_down = self
            .last_alert
            .is_none_or(|at| now.saturating_duration_since(at) >= self.config.cooldown);
        if cooled_down {
            self.last_alert = Some(now);
        }
        cooled_down
    }

    /// Failures currently remembered.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Default for ErrorWindow {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}

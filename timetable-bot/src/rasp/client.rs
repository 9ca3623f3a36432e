//! Yandex Rasp HTTP client.
//!
//! Provides async methods for the two API calls the bot needs: the
//! schedule between two points on a date, and the full station list.
//! Handles authentication, concurrency limits and pagination.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::try_join_all;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{MalformedThread, Point, PointCode, Thread};

use super::convert::{convert_search, convert_stations_list};
use super::error::RaspError;
use super::types::{SearchResponse, StationsListResponse};

/// Default base URL for the Rasp v3 API.
const DEFAULT_BASE_URL: &str = "https://api.rasp.yandex.net/v3.0";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Largest page the search endpoint serves.
const DEFAULT_PAGE_LIMIT: usize = 100;

/// Configuration for the Rasp client.
#[derive(Debug, Clone)]
pub struct RaspConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Segments requested per search page
    pub page_limit: usize,
    /// Transport filter for schedule searches
    pub transport_types: String,
    /// Transport type a station must serve to enter the directory
    pub station_transport_type: String,
    /// Response language
    pub lang: String,
}

impl RaspConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            page_limit: DEFAULT_PAGE_LIMIT,
            transport_types: "suburban".to_string(),
            station_transport_type: "train".to_string(),
            lang: "ru_RU".to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the search page size.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }
}

/// Rasp API client.
///
/// Uses a semaphore to limit concurrent requests, so paging through a busy
/// route cannot flood the API.
#[derive(Debug, Clone)]
pub struct RaspClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
    page_limit: usize,
    transport_types: String,
    station_transport_type: String,
    lang: String,
}

impl RaspClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RaspConfig) -> Result<Self, RaspError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| RaspError::InvalidConfig("invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            page_limit: config.page_limit.clamp(1, DEFAULT_PAGE_LIMIT),
            transport_types: config.transport_types,
            station_transport_type: config.station_transport_type,
            lang: config.lang,
        })
    }

    /// Fetch every departure from `from` to `to` on `date`.
    ///
    /// The first page tells how many segments exist; the remaining pages are
    /// fetched concurrently. Segments come back in API order, each converted
    /// separately so one malformed record does not fail the rest.
    pub async fn search(
        &self,
        from: &PointCode,
        to: &PointCode,
        date: NaiveDate,
    ) -> Result<Vec<Result<Thread, MalformedThread>>, RaspError> {
        let first = self.search_page(from, to, date, 0).await?;
        let total = first.pagination.total;
        let step = match first.pagination.limit {
            0 => self.page_limit,
            n => n,
        };

        let rest = try_join_all(
            (step..total)
                .step_by(step)
                .map(|offset| self.search_page(from, to, date, offset)),
        )
        .await?;

        debug!(
            from = from.as_str(),
            to = to.as_str(),
            %date,
            total,
            pages = rest.len() + 1,
            "fetched schedule"
        );

        Ok(std::iter::once(&first)
            .chain(&rest)
            .flat_map(convert_search)
            .collect())
    }

    /// Fetch the station list and flatten it into directory points for
    /// `country`.
    pub async fn points(&self, country: &str) -> Result<Vec<Point>, RaspError> {
        let list = self.stations_list().await?;
        let points = convert_stations_list(&list, country, &self.station_transport_type);
        debug!(country, count = points.len(), "fetched station list");
        Ok(points)
    }

    /// Fetch the raw station list (several megabytes).
    pub async fn stations_list(&self) -> Result<StationsListResponse, RaspError> {
        self.get_json("stations_list", &[("lang", self.lang.clone())])
            .await
    }

    async fn search_page(
        &self,
        from: &PointCode,
        to: &PointCode,
        date: NaiveDate,
        offset: usize,
    ) -> Result<SearchResponse, RaspError> {
        self.get_json(
            "search",
            &[
                ("from", from.as_str().to_string()),
                ("to", to.as_str().to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
                ("transport_types", self.transport_types.clone()),
                ("limit", self.page_limit.to_string()),
                ("offset", offset.to_string()),
                ("lang", self.lang.clone()),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, RaspError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RaspError::InvalidConfig("semaphore closed".to_string()))?;

        let url = format!("{}/{endpoint}/", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json")])
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RaspError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RaspError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(RaspError::UnknownPoint(body));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RaspError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RaspError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

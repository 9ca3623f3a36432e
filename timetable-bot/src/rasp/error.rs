//! Rasp client error types.

use std::fmt;

/// Errors from the Rasp HTTP client.
#[derive(Debug)]
pub enum RaspError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// One of the requested codes is unknown to the API
    UnknownPoint(String),

    /// Rate limited by the API
    RateLimited,

    /// Missing or invalid API key
    Unauthorized,

    /// Client could not be built from its configuration
    InvalidConfig(String),
}

impl fmt::Display for RaspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaspError::Http(e) => write!(f, "HTTP error: {e}"),
            RaspError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RaspError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            RaspError::UnknownPoint(message) => write!(f, "unknown point: {message}"),
            RaspError::RateLimited => write!(f, "rate limited by Rasp API"),
            RaspError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            RaspError::InvalidConfig(msg) => write!(f, "invalid client config: {msg}"),
        }
    }
}

impl std::error::Error for RaspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RaspError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RaspError {
    fn from(err: reqwest::Error) -> Self {
        RaspError::Http(err)
    }
}

impl RaspError {
    /// Whether the failure says something about the service's health (as
    /// opposed to a bad request from our side).
    pub fn is_service_failure(&self) -> bool {
        !matches!(self, RaspError::UnknownPoint(_) | RaspError::InvalidConfig(_))
    }
}

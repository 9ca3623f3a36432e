//! Point directory error types.

use crate::rasp::RaspError;

/// Errors that can occur when loading or refreshing the directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Fetching the station list failed
    #[error("failed to fetch points: {0}")]
    Fetch(#[from] RaspError),

    /// The directory was built from a fixed list and cannot refresh
    #[error("directory has no remote source")]
    NoSource,

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

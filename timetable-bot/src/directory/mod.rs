//! Directory of stations and settlements.
//!
//! Fetched from the Rasp station list at startup (or read from a disk
//! copy), kept in memory, and refreshed daily.

mod cache;
mod error;
mod store;

pub use cache::{DirectoryCache, DirectoryCacheConfig};
pub use error::DirectoryError;
pub use store::{PointDirectory, PointSource};

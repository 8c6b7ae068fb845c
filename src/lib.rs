//! Linkharvest: a scheduled, depth-bounded file harvester
//!
//! This crate implements a crawler that starts from configured seed pages,
//! follows hyperlinks matching a crawl pattern up to a depth limit, and
//! downloads files whose links match a file pattern, remembering across
//! scheduled runs which files have already been saved.

pub mod config;
pub mod crawler;
pub mod saver;
pub mod scheduler;
pub mod state;
pub mod storage;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for linkharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Bad HTTP status {status} for {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Empty response body for {url}")]
    EmptyBody { url: String },

    #[error("Destination directory {path} is unusable: {source}")]
    InvalidDestination {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Fetch-specific errors
///
/// Non-2xx statuses are not fetch errors: the fetcher hands back whatever
/// response completed within the size budget and callers judge the status.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Response for {url} exceeded size limit of {limit} bytes")]
    SizeExceeded { url: String, limit: usize },
}

/// File-saving errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Cannot derive a filename for {url}")]
    NoFilename { url: String },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for linkharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, HarvesterConfig, SeedConfig, SeedTask};
pub use crawler::{CrawlEngine, FetchedResource, Link};
pub use state::{VisitedEntry, VisitedStore};
pub use crate::url::canonicalize;

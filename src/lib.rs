//! Letterboxd list export
//!
//! This crate crawls a public Letterboxd list (following pagination), extracts
//! the film titles in list order, and turns them into a CSV document that the
//! Letterboxd importer accepts.

pub mod api;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for a crawl
///
/// Each variant corresponds to one caller-facing failure class; the API layer
/// maps them onto status codes.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid list URL: {0}")]
    Validation(String),

    #[error("Short link resolution failed: {0}")]
    Resolution(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch {
        url: String,
        /// Upstream HTTP status, absent for network-level failures
        status: Option<u16>,
        message: String,
    },

    #[error("No movies found")]
    NoResults,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UrlError> for CrawlError {
    fn from(err: UrlError) -> Self {
        CrawlError::Validation(err.to_string())
    }
}

impl From<state::InvalidTransition> for CrawlError {
    fn from(err: state::InvalidTransition) -> Self {
        CrawlError::Internal(err.to_string())
    }
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
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("URL is not on the list site: {0}")]
    ForeignSite(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl_list, BrowserClient, CrawlResult};
pub use output::encode_csv;
pub use state::CrawlState;
pub use url::{normalize_list_url, page_url};

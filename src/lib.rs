//! Careermap: a resumable club-affiliation harvester
//!
//! This crate crawls a football statistics site one league season at a time,
//! discovers clubs and players, and reduces each player's raw transfer ledger
//! to a season-indexed record of professional club affiliations. Progress is
//! checkpointed after every completed unit of work, so an interrupted run
//! resumes at the first incomplete key.

pub mod config;
pub mod crawler;
pub mod identity;
pub mod model;
pub mod reduce;
pub mod status;
pub mod storage;

use thiserror::Error;

/// Main error type for careermap operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Nothing extractable for {url}: missing {what}")]
    Extraction { url: String, what: &'static str },

    #[error("{context}: retries exhausted: {source}")]
    RetriesExhausted {
        context: String,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

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
}

/// Result type alias for careermap operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{PlayerRecord, Position, RawTransferEvent, SeasonLabel, WorkKey};
pub use reduce::{is_youth_or_reserve, reduce_transfers, Rejection};

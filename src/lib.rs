//! Mail-Ripple: a bounded, polite email harvester
//!
//! This crate crawls each target domain within a page and byte budget,
//! collects email addresses that belong to the domain, and writes them to a
//! per-domain output file. Many domains are crawled in parallel by a fixed
//! worker pool; each individual crawl is sequential.

pub mod config;
pub mod crawler;
pub mod email;
pub mod input;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Mail-Ripple operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read domain list {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid email pattern for {domain}: {source}")]
    Pattern { domain: String, source: regex::Error },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
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
}

/// Result type alias for Mail-Ripple operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, DomainCrawler, Fetcher, FetchResult, Scheduler};
pub use state::CrawlState;
pub use crate::url::authority;

//! Configuration module for Mail-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section and key is optional; missing values fall back to the defaults
//! the harvester has always used (100 pages, 10 MB, 10 workers, 3 attempts
//! two seconds apart, 10 second timeout).
//!
//! # Example
//!
//! ```no_run
//! use mail_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mail-ripple.toml")).unwrap();
//! println!("Each domain is capped at {} pages", config.crawler.page_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, OutputConfig, BYTES_PER_MB, DEFAULT_USER_AGENTS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;

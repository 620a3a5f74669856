use serde::Deserialize;
use std::time::Duration;

/// Browser signatures presented by the fetcher, one picked per request
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.0 Mobile/15E148 Safari/604.1",
];

/// Number of bytes in one megabyte of byte budget
pub const BYTES_PER_MB: u64 = 1_048_576;

/// Main configuration structure for Mail-Ripple
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl bounds and worker pool size
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of distinct URLs visited per domain
    #[serde(rename = "page-limit")]
    pub page_limit: usize,

    /// Maximum response bytes accumulated per domain, in megabytes
    #[serde(rename = "byte-limit-mb")]
    pub byte_limit_mb: u64,

    /// Number of domains crawled concurrently
    pub workers: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_limit: 100,
            byte_limit_mb: 10,
            workers: crate::crawler::DEFAULT_WORKERS,
        }
    }
}

impl CrawlerConfig {
    /// The byte budget expressed in bytes
    pub fn byte_limit(&self) -> u64 {
        self.byte_limit_mb.saturating_mul(BYTES_PER_MB)
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total attempts per URL before giving up
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Pause between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Bound on a single attempt (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Pool of client identities rotated per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 2000,
            timeout_secs: 10,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FetcherConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the per-domain files are written to
    pub directory: String,

    /// File extension appended to each per-domain file name
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            extension: "txt".to_string(),
        }
    }
}

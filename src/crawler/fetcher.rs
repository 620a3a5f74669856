//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with a per-attempt timeout
//! - Rotating the presented user agent on every attempt
//! - Retrying failed attempts after a fixed pause
//! - Downgrading exhausted retries to a `Failure` value

use crate::config::FetcherConfig;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered with a non-error (below 400) status
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body, decoded lossily as UTF-8
        body: String,
        /// Length of the raw response body in bytes
        byte_size: u64,
    },

    /// Every attempt failed (connection error, timeout, 4xx or 5xx status)
    Failure {
        /// Description of the last error seen
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Builds an HTTP client with the configured per-attempt timeout
///
/// The user agent is not baked into the client; it is chosen per request.
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = config.timeout();

    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs GET requests with bounded retries and a rotating client identity
///
/// Cloning is cheap: the underlying client shares its connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agents: Vec<String>,
    max_retries: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher from an immutable configuration value
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay(),
        })
    }

    /// Picks a user agent from the pool
    fn pick_user_agent(&self) -> Option<&str> {
        if self.user_agents.is_empty() {
            return None;
        }
        let index = rand::random_range(0..self.user_agents.len());
        Some(self.user_agents[index].as_str())
    }

    /// Fetches a URL, retrying failed attempts
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Below 400 | Return `Success` |
    /// | 4xx or 5xx status | Retry |
    /// | Timeout / connection error | Retry |
    /// | Body read error | Retry |
    /// | Attempts exhausted | Return `Failure` with the last error |
    ///
    /// The pause between attempts is an async sleep, so only the calling
    /// worker waits. There is no pause after the final attempt.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=self.max_retries {
            match self.attempt(url).await {
                Ok(result) => return result,
                Err(e) => {
                    tracing::warn!(
                        "Error visiting {}: {} (Retry {}/{})",
                        url,
                        e,
                        attempt,
                        self.max_retries
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.max_retries && !self.retry_delay.is_zero() {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        FetchResult::Failure { error: last_error }
    }

    /// A single GET attempt
    async fn attempt(&self, url: &str) -> Result<FetchResult, reqwest::Error> {
        let mut request = self.client.get(url);
        if let Some(user_agent) = self.pick_user_agent() {
            request = request.header(USER_AGENT, user_agent);
        }

        let response = request.send().await?.error_for_status()?;
        let status_code = response.status().as_u16();
        let bytes = response.bytes().await?;

        Ok(FetchResult::Success {
            status_code,
            byte_size: bytes.len() as u64,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

//! Domain crawler - the per-domain traversal loop
//!
//! One call to [`DomainCrawler::crawl`] owns a fresh [`CrawlState`] and runs
//! sequentially until the frontier empties or a limit is reached:
//! - Take the oldest frontier URL and mark it visited
//! - Fetch it (retries happen inside the fetcher)
//! - Count its bytes
//! - On status 200 only, harvest emails and queue same-domain links

use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::crawler::parser::extract_links;
use crate::email::EmailScanner;
use crate::state::{CrawlLimits, CrawlState};
use crate::url::{authority, seed_url};
use crate::HarvestError;
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

/// Outcome of one domain crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// The domain as it was given to the crawler
    pub domain: String,

    /// Addresses matching `<local>@<domain>`
    pub emails: HashSet<String>,

    /// Distinct URLs visited, failed fetches included
    pub pages_visited: usize,

    /// Total response bytes received
    pub bytes_fetched: u64,

    /// URLs whose every fetch attempt failed
    pub failed_fetches: usize,

    /// Non-error responses other than 200, which yield nothing
    pub skipped_status: usize,
}

impl CrawlReport {
    pub fn into_emails(self) -> HashSet<String> {
        self.emails
    }
}

/// Runs bounded crawls of single domains
///
/// Shared read-only between workers; every crawl builds its own state.
#[derive(Debug, Clone)]
pub struct DomainCrawler {
    fetcher: Fetcher,
    limits: CrawlLimits,
}

impl DomainCrawler {
    /// Creates a crawler with the given fetcher and limits
    pub fn new(fetcher: Fetcher, limits: CrawlLimits) -> Self {
        Self { fetcher, limits }
    }

    /// Crawls `domain` starting from `http://<domain>`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl finished; an unreachable site simply
    ///   yields an empty email set
    /// * `Err(HarvestError::Pattern)` - The domain could not be turned into an
    ///   email pattern; nothing was fetched
    pub async fn crawl(&self, domain: &str) -> Result<CrawlReport, HarvestError> {
        let scanner = EmailScanner::new(domain).map_err(|source| HarvestError::Pattern {
            domain: domain.to_string(),
            source,
        })?;

        let seed = seed_url(domain);
        let base_domain = Url::parse(&seed)
            .ok()
            .and_then(|url| authority(&url))
            .unwrap_or_else(|| domain.to_string());

        tracing::info!("Spidering through the website: {}", domain);
        let start_time = Instant::now();

        let mut state = CrawlState::new(seed);
        let mut failed_fetches = 0;
        let mut skipped_status = 0;

        while state.should_continue(&self.limits) {
            let current_url = match state.take_next() {
                Some(url) => url,
                None => break,
            };
            debug_assert!(state.is_disjoint());
            tracing::debug!(
                "[{}/{}] Visiting {}",
                state.visited_count(),
                self.limits.page_limit,
                current_url
            );

            let (status_code, body, byte_size) = match self.fetcher.fetch(&current_url).await {
                FetchResult::Success {
                    status_code,
                    body,
                    byte_size,
                } => (status_code, body, byte_size),
                FetchResult::Failure { error } => {
                    tracing::debug!("Skipping {}: {}", current_url, error);
                    failed_fetches += 1;
                    continue;
                }
            };

            state.add_bytes(byte_size);

            if status_code != 200 {
                tracing::debug!(
                    "Status {} for {}, not harvesting",
                    status_code,
                    current_url
                );
                skipped_status += 1;
                continue;
            }

            let new_emails = state.merge_emails(scanner.scan(&body));
            if new_emails > 0 {
                tracing::debug!("Found {} new emails on {}", new_emails, current_url);
            }

            let links = extract_links(&current_url, &body, &base_domain);
            let queued = state.enqueue(links);
            tracing::trace!("Queued {} new links from {}", queued, current_url);
        }

        tracing::info!(
            "Finished {}: {} pages, {} bytes, {} emails in {:?}",
            domain,
            state.visited_count(),
            state.bytes_fetched(),
            state.emails().len(),
            start_time.elapsed()
        );

        Ok(CrawlReport {
            domain: domain.to_string(),
            pages_visited: state.visited_count(),
            bytes_fetched: state.bytes_fetched(),
            failed_fetches,
            skipped_status,
            emails: state.into_emails(),
        })
    }
}

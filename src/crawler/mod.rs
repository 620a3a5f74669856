//! Crawler module for fetching pages and harvesting addresses
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing and same-domain link extraction
//! - The per-domain traversal loop
//! - The worker pool that runs many domain crawls at once

mod domain_crawler;
mod fetcher;
mod parser;
mod scheduler;

pub use domain_crawler::{CrawlReport, DomainCrawler};
pub use fetcher::{build_http_client, FetchResult, Fetcher};
pub use parser::extract_links;
pub use scheduler::{CrawlJob, JobQueue, Scheduler, DEFAULT_WORKERS};

use crate::config::Config;
use crate::output::{EmailSink, RunStatistics};
use crate::state::CrawlLimits;
use crate::HarvestError;
use std::sync::Arc;

/// Builds a domain crawler from configuration
pub fn build_crawler(config: &Config) -> Result<DomainCrawler, HarvestError> {
    let fetcher = Fetcher::new(&config.fetcher)?;
    Ok(DomainCrawler::new(fetcher, CrawlLimits::from(&config.crawler)))
}

/// Runs a complete harvest over a set of domains
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client and crawler from `config`
/// 2. Queue one job per distinct domain
/// 3. Run `config.crawler.workers` workers until the queue drains
/// 4. Hand each domain's addresses to `sink`
///
/// # Returns
///
/// * `Ok(RunStatistics)` - Every domain was attempted
/// * `Err(HarvestError)` - The HTTP client could not be built; nothing ran
pub async fn harvest<I, S>(
    config: &Config,
    domains: I,
    sink: Arc<dyn EmailSink>,
    validate_syntax: bool,
) -> Result<RunStatistics, HarvestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let crawler = build_crawler(config)?;
    let scheduler =
        Scheduler::new(crawler, sink, config.crawler.workers).with_syntax_filter(validate_syntax);
    Ok(scheduler.run_all(domains).await)
}

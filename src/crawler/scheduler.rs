//! Scheduler for running many domain crawls in parallel
//!
//! This module handles:
//! - The shared job queue, one `CrawlJob` per distinct domain
//! - A fixed pool of worker tasks draining the queue
//! - Isolating each domain's crawl so a panic or error only loses that domain
//! - Handing harvested addresses to the output sink
//!
//! The job queue is the only state the workers share.

use crate::crawler::domain_crawler::{CrawlReport, DomainCrawler};
use crate::email::retain_valid_syntax;
use crate::output::{EmailSink, RunStatistics};
use crate::HarvestError;
use std::collections::{BTreeSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Default size of the worker pool
pub const DEFAULT_WORKERS: usize = 10;

/// One domain waiting to be crawled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlJob {
    pub domain: String,
}

/// Concurrency-safe queue of crawl jobs
///
/// Each job is handed out exactly once; the queue is drained once `pop`
/// returns `None`.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Mutex<VecDeque<CrawlJob>>,
}

impl JobQueue {
    /// Builds a queue with one job per distinct, non-blank domain
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        let jobs = distinct
            .into_iter()
            .map(|domain| CrawlJob { domain })
            .collect();

        Self {
            jobs: Mutex::new(jobs),
        }
    }

    /// Takes the next job, or `None` when the queue is drained
    pub async fn pop(&self) -> Option<CrawlJob> {
        self.jobs.lock().await.pop_front()
    }

    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_drained(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }
}

/// What a finished job produced
#[derive(Debug)]
struct JobOutcome {
    report: CrawlReport,
    invalid_dropped: usize,
    path: PathBuf,
}

/// Scheduler manages the worker pool and the job queue
///
/// The scheduler coordinates:
/// - Exactly `worker_count` concurrent workers
/// - One full sequential crawl per job
/// - Per-domain failure isolation at the worker boundary
/// - Aggregated run statistics
pub struct Scheduler {
    crawler: Arc<DomainCrawler>,
    sink: Arc<dyn EmailSink>,
    worker_count: usize,
    validate_syntax: bool,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `crawler` - The crawler every worker runs
    /// * `sink` - Where each domain's addresses are written
    /// * `worker_count` - Number of concurrent workers (at least one is started)
    pub fn new(crawler: DomainCrawler, sink: Arc<dyn EmailSink>, worker_count: usize) -> Self {
        Self {
            crawler: Arc::new(crawler),
            sink,
            worker_count: worker_count.max(1),
            validate_syntax: false,
        }
    }

    /// Drops harvested addresses that fail the syntax check before writing
    pub fn with_syntax_filter(mut self, enabled: bool) -> Self {
        self.validate_syntax = enabled;
        self
    }

    /// Crawls every distinct domain and waits for the queue to drain
    ///
    /// # Returns
    ///
    /// Statistics merged from all workers once every worker has finished.
    pub async fn run_all<I, S>(&self, domains: I) -> RunStatistics
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let queue = Arc::new(JobQueue::new(domains));
        let scheduled = queue.len().await;

        tracing::info!(
            "Starting to harvest {} domains with {} workers",
            scheduled,
            self.worker_count
        );

        let mut handles = Vec::with_capacity(self.worker_count);
        for worker_id in 0..self.worker_count {
            handles.push(tokio::spawn(run_worker(
                worker_id,
                Arc::clone(&queue),
                Arc::clone(&self.crawler),
                Arc::clone(&self.sink),
                self.validate_syntax,
            )));
        }

        let mut stats = RunStatistics::new(scheduled);
        for handle in handles {
            match handle.await {
                Ok(worker_stats) => stats.merge(worker_stats),
                Err(e) => tracing::error!("Worker task ended abnormally: {}", e),
            }
        }

        tracing::info!("Harvesting completed for all domains");
        stats
    }
}

/// Pulls jobs until the queue is drained
///
/// Each job runs in its own task so a panic inside one domain's crawl is
/// reported here instead of taking the worker down.
async fn run_worker(
    worker_id: usize,
    queue: Arc<JobQueue>,
    crawler: Arc<DomainCrawler>,
    sink: Arc<dyn EmailSink>,
    validate_syntax: bool,
) -> RunStatistics {
    let mut stats = RunStatistics::default();

    while let Some(job) = queue.pop().await {
        let domain = job.domain.clone();
        tracing::debug!("Worker {} picked up {}", worker_id, domain);

        let handle = tokio::spawn(process_job(
            job,
            Arc::clone(&crawler),
            Arc::clone(&sink),
            validate_syntax,
        ));

        match handle.await {
            Ok(Ok(outcome)) => {
                tracing::info!(
                    "Saved {} emails for {} to {}",
                    outcome.report.emails.len(),
                    domain,
                    outcome.path.display()
                );
                stats.record_report(&outcome.report, outcome.invalid_dropped);
            }
            Ok(Err(e)) => {
                tracing::error!("Harvest of {} failed: {}", domain, e);
                stats.record_failure(&domain);
            }
            Err(e) if e.is_panic() => {
                tracing::error!("Harvest of {} panicked; skipping domain", domain);
                stats.record_failure(&domain);
            }
            Err(e) => {
                tracing::error!("Harvest of {} was cancelled: {}", domain, e);
                stats.record_failure(&domain);
            }
        }
    }

    tracing::debug!("Worker {} found the queue drained", worker_id);
    stats
}

/// Crawls one domain and writes its addresses
async fn process_job(
    job: CrawlJob,
    crawler: Arc<DomainCrawler>,
    sink: Arc<dyn EmailSink>,
    validate_syntax: bool,
) -> Result<JobOutcome, HarvestError> {
    let mut report = crawler.crawl(&job.domain).await?;

    let invalid_dropped = if validate_syntax {
        retain_valid_syntax(&mut report.emails)
    } else {
        0
    };

    let path = sink.write_emails(&job.domain, &report.emails)?;

    Ok(JobOutcome {
        report,
        invalid_dropped,
        path,
    })
}

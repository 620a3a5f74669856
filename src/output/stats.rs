//! Run statistics
//!
//! Each worker keeps its own tally; the scheduler merges them once every
//! worker has finished, so no counters are shared during the run.

use crate::crawler::CrawlReport;

/// Aggregate results of one harvesting run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Distinct domains placed on the job queue
    pub domains_scheduled: usize,

    /// Domains crawled and written
    pub domains_completed: usize,

    /// Domains abandoned (crawl error, panic, or write failure)
    pub failed_domains: Vec<String>,

    /// Pages visited across all domains
    pub pages_visited: usize,

    /// Pages whose fetch attempts were all exhausted
    pub failed_fetches: usize,

    /// Response bytes received across all domains
    pub bytes_fetched: u64,

    /// Addresses written across all domains
    pub emails_found: usize,

    /// Addresses removed by the syntax filter
    pub invalid_emails_dropped: usize,
}

impl RunStatistics {
    /// Creates empty statistics for a run of `domains_scheduled` domains
    pub fn new(domains_scheduled: usize) -> Self {
        Self {
            domains_scheduled,
            ..Self::default()
        }
    }

    /// Adds a completed domain's report
    pub fn record_report(&mut self, report: &CrawlReport, invalid_dropped: usize) {
        self.domains_completed += 1;
        self.pages_visited += report.pages_visited;
        self.failed_fetches += report.failed_fetches;
        self.bytes_fetched += report.bytes_fetched;
        self.emails_found += report.emails.len();
        self.invalid_emails_dropped += invalid_dropped;
    }

    /// Records a domain that produced no output
    pub fn record_failure(&mut self, domain: &str) {
        self.failed_domains.push(domain.to_string());
    }

    /// Folds another worker's tally into this one
    ///
    /// `domains_scheduled` is owned by the run, not by workers, and is kept.
    pub fn merge(&mut self, other: RunStatistics) {
        self.domains_completed += other.domains_completed;
        self.failed_domains.extend(other.failed_domains);
        self.pages_visited += other.pages_visited;
        self.failed_fetches += other.failed_fetches;
        self.bytes_fetched += other.bytes_fetched;
        self.emails_found += other.emails_found;
        self.invalid_emails_dropped += other.invalid_emails_dropped;
    }

    pub fn domains_failed(&self) -> usize {
        self.failed_domains.len()
    }

    /// Domains that were completed or failed
    pub fn domains_processed(&self) -> usize {
        self.domains_completed + self.failed_domains.len()
    }

    /// Returns the completion rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let processed = self.domains_processed();
        if processed == 0 {
            return 0.0;
        }
        (self.domains_completed as f64 / processed as f64) * 100.0
    }
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Mail-Ripple Run Statistics ===\n");

    println!("Domains:");
    println!("  Scheduled: {}", stats.domains_scheduled);
    println!("  Completed: {}", stats.domains_completed);
    println!("  Failed: {}", stats.domains_failed());
    println!("  Success rate: {:.2}%", stats.success_rate());

    println!("\nTraversal:");
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Failed fetches: {}", stats.failed_fetches);
    println!(
        "  Bytes fetched: {} ({:.2} MB)",
        stats.bytes_fetched,
        stats.bytes_fetched as f64 / 1_048_576.0
    );

    println!("\nEmails:");
    println!("  Written: {}", stats.emails_found);
    if stats.invalid_emails_dropped > 0 {
        println!("  Dropped by syntax check: {}", stats.invalid_emails_dropped);
    }

    if !stats.failed_domains.is_empty() {
        let mut failed = stats.failed_domains.clone();
        failed.sort();
        println!("\nFailed domains:");
        for domain in failed {
            println!("  - {}", domain);
        }
    }
}

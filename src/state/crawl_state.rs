use crate::config::{CrawlerConfig, BYTES_PER_MB};
use std::collections::{HashSet, VecDeque};

/// Traversal bounds for one domain crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Maximum number of distinct URLs visited
    pub page_limit: usize,

    /// Byte budget; the crawl stops once this many bytes have been fetched
    pub byte_limit: u64,
}

impl CrawlLimits {
    /// Creates limits from a page count and a budget in megabytes
    pub fn new(page_limit: usize, byte_limit_mb: u64) -> Self {
        Self {
            page_limit,
            byte_limit: byte_limit_mb.saturating_mul(BYTES_PER_MB),
        }
    }

    /// Replaces the byte budget with an exact byte count
    pub fn with_byte_limit(mut self, bytes: u64) -> Self {
        self.byte_limit = bytes;
        self
    }
}

impl Default for CrawlLimits {
    fn default() -> Self {
        Self::new(100, 10)
    }
}

impl From<&CrawlerConfig> for CrawlLimits {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            page_limit: config.page_limit,
            byte_limit: config.byte_limit(),
        }
    }
}

/// Traversal state for a single domain crawl
///
/// Owned by exactly one crawl and dropped when it ends. The frontier is FIFO;
/// a companion set keeps each URL queued at most once, and a URL only ever
/// leaves the frontier by moving into `visited`, so the two never overlap.
#[derive(Debug, Clone)]
pub struct CrawlState {
    visited: HashSet<String>,
    frontier: VecDeque<String>,
    queued: HashSet<String>,
    bytes_fetched: u64,
    emails_found: HashSet<String>,
}

impl CrawlState {
    /// Creates a fresh state with `seed` as the only frontier entry
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        let mut state = Self {
            visited: HashSet::new(),
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            bytes_fetched: 0,
            emails_found: HashSet::new(),
        };
        state.queued.insert(seed.clone());
        state.frontier.push_back(seed);
        state
    }

    /// Whether the traversal may fetch another page
    ///
    /// False as soon as the frontier is empty, the page limit is reached, or
    /// the byte budget is used up.
    pub fn should_continue(&self, limits: &CrawlLimits) -> bool {
        !self.frontier.is_empty()
            && self.visited.len() < limits.page_limit
            && self.bytes_fetched < limits.byte_limit
    }

    /// Moves the oldest unvisited frontier URL into `visited` and returns it
    pub fn take_next(&mut self) -> Option<String> {
        while let Some(url) = self.frontier.pop_front() {
            self.queued.remove(&url);
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    /// Queues every link that is neither visited nor already queued
    ///
    /// Returns the number of URLs added.
    pub fn enqueue<I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for link in links {
            if self.visited.contains(&link) || self.queued.contains(&link) {
                continue;
            }
            self.queued.insert(link.clone());
            self.frontier.push_back(link);
            added += 1;
        }
        added
    }

    pub fn add_bytes(&mut self, bytes: u64) {
        self.bytes_fetched = self.bytes_fetched.saturating_add(bytes);
    }

    /// Merges newly found addresses, returning how many were new
    pub fn merge_emails<I>(&mut self, emails: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.emails_found.len();
        self.emails_found.extend(emails);
        self.emails_found.len() - before
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn bytes_fetched(&self) -> u64 {
        self.bytes_fetched
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn emails(&self) -> &HashSet<String> {
        &self.emails_found
    }

    /// True when no URL is both visited and waiting in the frontier
    pub fn is_disjoint(&self) -> bool {
        self.frontier.iter().all(|url| !self.visited.contains(url))
    }

    /// Consumes the state, keeping only the harvested addresses
    pub fn into_emails(self) -> HashSet<String> {
        self.emails_found
    }
}

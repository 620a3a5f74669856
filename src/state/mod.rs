//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: visited set, frontier, byte total and harvested addresses
//!   for one domain crawl
//! - `CrawlLimits`: the page and byte bounds that end a crawl

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlLimits, CrawlState};

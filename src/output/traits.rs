//! Output sink trait and errors
//!
//! A sink receives each domain's harvested addresses once that domain's
//! crawl completes.

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output sinks
///
/// One sink is shared by every worker, so implementations must be
/// thread-safe. Each domain is written at most once per run.
pub trait EmailSink: Send + Sync {
    /// Records the addresses harvested for a domain
    ///
    /// # Arguments
    ///
    /// * `domain` - The domain as it appeared in the input list
    /// * `emails` - The harvested addresses (possibly empty)
    ///
    /// # Returns
    ///
    /// The location the addresses were written to
    fn write_emails(&self, domain: &str, emails: &HashSet<String>) -> OutputResult<PathBuf>;
}

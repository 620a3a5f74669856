//! Output module for harvested addresses
//!
//! This module handles:
//! - The `EmailSink` trait workers hand results to
//! - Writing one text file per domain
//! - Recording and printing run statistics

mod file_output;
pub mod stats;
mod traits;

pub use file_output::{output_file_name, FileSink};
pub use stats::{print_statistics, RunStatistics};
pub use traits::{EmailSink, OutputError, OutputResult};

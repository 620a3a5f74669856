//! Domain list input
//!
//! The input file holds one domain per line. Lines are trimmed, blank lines
//! are skipped and duplicates collapse, so the result is the exact set of
//! domains to schedule.

use crate::HarvestError;
use std::collections::BTreeSet;
use std::path::Path;

/// Reads the domain list at `path`
///
/// # Returns
///
/// * `Ok(BTreeSet<String>)` - The distinct domains, possibly empty
/// * `Err(HarvestError::Input)` - The file is missing or unreadable
pub fn load_domains(path: &Path) -> Result<BTreeSet<String>, HarvestError> {
    let content = std::fs::read_to_string(path).map_err(|source| HarvestError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_domains(&content))
}

/// Extracts the distinct, non-blank domains from list text
pub fn parse_domains(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

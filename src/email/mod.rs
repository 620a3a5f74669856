//! Email matching and validation
//!
//! - `EmailScanner`: the per-domain pattern applied to every 200 page
//! - `is_valid_email_syntax`: optional post-filter on harvested addresses
//! - `has_valid_mx`: optional pre-filter on input domains
//!
//! Neither predicate runs inside the crawl loop.

mod mx;
mod scanner;

pub use mx::{has_mx_with, has_valid_mx};
pub use scanner::{is_valid_email_syntax, EmailScanner};

use std::collections::HashSet;

/// Drops addresses that fail the syntax check
pub fn retain_valid_syntax(emails: &mut HashSet<String>) -> usize {
    let before = emails.len();
    emails.retain(|email| is_valid_email_syntax(email));
    before - emails.len()
}

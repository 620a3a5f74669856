//! URL handling module for Mail-Ripple
//!
//! Crawl scope is decided by comparing authorities: a link is followed only
//! when its `host[:port]` equals the authority of the crawl's seed URL.

mod domain;

pub use domain::authority;

/// Builds the seed URL a domain crawl starts from
///
/// Seeds are always plain `http://`; servers that prefer HTTPS redirect.
pub fn seed_url(domain: &str) -> String {
    format!("http://{}", domain)
}

use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Checks whether a domain publishes at least one MX record
///
/// Resolver construction failures, NXDOMAIN, empty answers and timeouts all
/// count as "no valid MX".
pub async fn has_valid_mx(domain: &str) -> bool {
    let resolver =
        match TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()) {
            Ok(resolver) => resolver,
            Err(e) => {
                tracing::warn!("Failed to create DNS resolver: {}", e);
                return false;
            }
        };

    has_mx_with(&resolver, domain).await
}

/// Same as [`has_valid_mx`], reusing an existing resolver
pub async fn has_mx_with(resolver: &TokioAsyncResolver, domain: &str) -> bool {
    match resolver.mx_lookup(domain).await {
        Ok(lookup) => lookup.iter().next().is_some(),
        Err(e) => {
            tracing::debug!("MX lookup failed for {}: {}", domain, e);
            false
        }
    }
}

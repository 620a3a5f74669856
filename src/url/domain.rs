use url::Url;

/// Extracts the authority (`host[:port]`) from a URL
///
/// The host is taken as the parsed URL holds it, so it is already lowercased
/// for domain names. The port only appears when it differs from the scheme's
/// default. URLs without a host (`mailto:`, `javascript:`, `data:`) have no
/// authority.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use mail_ripple::url::authority;
///
/// let url = Url::parse("http://example.com/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(authority(&url), None);
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

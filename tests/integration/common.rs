use mail_ripple::config::FetcherConfig;
use mail_ripple::crawler::{DomainCrawler, Fetcher};
use mail_ripple::output::{EmailSink, OutputError, OutputResult};
use mail_ripple::state::CrawlLimits;
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetcher settings that keep retries fast
pub fn test_fetcher_config() -> FetcherConfig {
    FetcherConfig {
        max_retries: 3,
        retry_delay_ms: 10,
        timeout_secs: 5,
        ..FetcherConfig::default()
    }
}

pub fn create_test_crawler(limits: CrawlLimits) -> DomainCrawler {
    let fetcher = Fetcher::new(&test_fetcher_config()).expect("Failed to build fetcher");
    DomainCrawler::new(fetcher, limits)
}

/// The crawl domain for a mock server, e.g. "127.0.0.1:41234"
pub fn domain_of(server: &MockServer) -> String {
    server.address().to_string()
}

pub fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Mounts a one-page site whose only content is `email`
pub async fn mount_single_page(server: &MockServer, email: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            "<html><body>Write to {}</body></html>",
            email
        )))
        .mount(server)
        .await;
}

pub fn set(items: &[String]) -> HashSet<String> {
    items.iter().cloned().collect()
}

/// Sink that keeps every write in memory
#[derive(Default)]
pub struct MemorySink {
    written: Mutex<Vec<(String, HashSet<String>)>>,
}

impl MemorySink {
    pub fn written(&self) -> Vec<(String, HashSet<String>)> {
        self.written.lock().unwrap().clone()
    }

    pub fn emails_for(&self, domain: &str) -> Option<HashSet<String>> {
        self.written()
            .into_iter()
            .find(|(d, _)| d == domain)
            .map(|(_, emails)| emails)
    }
}

impl EmailSink for MemorySink {
    fn write_emails(&self, domain: &str, emails: &HashSet<String>) -> OutputResult<PathBuf> {
        self.written
            .lock()
            .unwrap()
            .push((domain.to_string(), emails.clone()));
        Ok(PathBuf::from(domain))
    }
}

/// Sink that panics for one domain and records the rest
pub struct PanickingSink {
    pub poisoned_domain: String,
    pub inner: MemorySink,
}

impl EmailSink for PanickingSink {
    fn write_emails(&self, domain: &str, emails: &HashSet<String>) -> OutputResult<PathBuf> {
        if domain == self.poisoned_domain {
            panic!("sink exploded for {}", domain);
        }
        self.inner.write_emails(domain, emails)
    }
}

/// Sink whose write fails for one domain and records the rest
pub struct FailingSink {
    pub failing_domain: String,
    pub inner: MemorySink,
}

impl EmailSink for FailingSink {
    fn write_emails(&self, domain: &str, emails: &HashSet<String>) -> OutputResult<PathBuf> {
        if domain == self.failing_domain {
            return Err(OutputError::Write {
                path: PathBuf::from(domain),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.inner.write_emails(domain, emails)
    }
}

use crate::common::{create_test_crawler, domain_of, html_response, set};
use mail_ripple::crawler::{FetchResult, Fetcher};
use mail_ripple::config::FetcherConfig;
use mail_ripple::state::CrawlLimits;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a small site:
/// `/` -> links to /about, /contact and an external host
/// `/about` -> links back to `/`
/// `/contact` -> no links
async fn mount_small_site(server: &MockServer, domain: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="/about">About</a>
            <a href="/contact">Contact</a>
            <a href="http://elsewhere.test/page">Elsewhere</a>
            Reach us at info@{domain} or partner@elsewhere.test
            </body></html>"#
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_response(format!(
            r#"<html><body><a href="/">Home</a> Sales: sales@{domain}</body></html>"#
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html_response(format!(
            r#"<html><body>info@{domain} and support@{domain}</body></html>"#
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);
    mount_small_site(&mock_server, &domain).await;

    let crawler = create_test_crawler(CrawlLimits::default());
    let report = crawler.crawl(&domain).await.expect("Crawl failed");

    let expected = set(&[
        format!("info@{}", domain),
        format!("sales@{}", domain),
        format!("support@{}", domain),
    ]);
    assert_eq!(report.emails, expected);

    // The seed "http://host:port" and the resolved "http://host:port/" are
    // distinct URLs, so the home page is visited twice.
    assert_eq!(report.pages_visited, 4);
    assert_eq!(report.failed_fetches, 0);
    assert!(report.bytes_fetched > 0);
}

#[tokio::test]
async fn test_unreachable_seed_returns_empty_set() {
    let crawler = create_test_crawler(CrawlLimits::default());

    // Nothing listens on port 1
    let report = crawler.crawl("127.0.0.1:1").await.expect("Crawl failed");

    assert!(report.emails.is_empty());
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.failed_fetches, 1);
    assert_eq!(report.bytes_fetched, 0);
}

#[tokio::test]
async fn test_failing_page_is_retried_then_skipped() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string(format!("oops@{}", domain)))
        .expect(3)
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(CrawlLimits::default());
    let report = crawler.crawl(&domain).await.expect("Crawl failed");

    assert!(report.emails.is_empty());
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.failed_fetches, 1);
    assert_eq!(report.bytes_fetched, 0);

    // Wiremock verifies the three attempts when mock_server drops
}

#[tokio::test]
async fn test_fetch_recovers_after_transient_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(&crate::common::test_fetcher_config()).unwrap();
    let result = fetcher
        .fetch(&format!("{}/flaky", mock_server.uri()))
        .await;

    assert_eq!(
        result,
        FetchResult::Success {
            status_code: 200,
            body: "recovered".to_string(),
            byte_size: 9,
        }
    );
}

#[tokio::test]
async fn test_fetch_presents_pool_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "OnlyAgent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = FetcherConfig {
        user_agents: vec!["OnlyAgent/1.0".to_string()],
        ..crate::common::test_fetcher_config()
    };
    let fetcher = Fetcher::new(&config).unwrap();
    let result = fetcher.fetch(&format!("{}/", mock_server.uri())).await;

    assert!(result.is_success());
}

#[tokio::test]
async fn test_page_limit_bounds_visits() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);

    let links: String = (1..=9)
        .map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .respond_with(html_response(format!("<html><body>{}</body></html>", links)))
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(CrawlLimits::new(3, 10));
    let report = crawler.crawl(&domain).await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 3);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_byte_limit_stops_traversal() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);

    let body = format!(
        "<html><body><a href=\"/next\">next</a>{}</body></html>",
        "x".repeat(200)
    );
    let body_len = body.len() as u64;
    Mock::given(method("GET"))
        .respond_with(html_response(body))
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(CrawlLimits::default().with_byte_limit(100));
    let report = crawler.crawl(&domain).await.expect("Crawl failed");

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.bytes_fetched, body_len);
}

#[tokio::test]
async fn test_non_200_success_counts_but_yields_nothing() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);

    let body = format!(
        r#"<html><body><a href="/more">more</a> hidden@{}</body></html>"#,
        domain
    );
    let body_len = body.len() as u64;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(203)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/more"))
        .respond_with(html_response("never fetched".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(CrawlLimits::default());
    let report = crawler.crawl(&domain).await.expect("Crawl failed");

    assert!(report.emails.is_empty());
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.skipped_status, 1);
    assert_eq!(report.bytes_fetched, body_len);
}

#[tokio::test]
async fn test_emails_for_other_domains_ignored() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            "contact me at foo.bar@{} or baz@other.com",
            domain
        )))
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(CrawlLimits::default());
    let report = crawler.crawl(&domain).await.expect("Crawl failed");

    assert_eq!(report.emails, set(&[format!("foo.bar@{}", domain)]));
}

#[tokio::test]
async fn test_failed_subpage_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<a href="/missing">missing</a><a href="/ok">ok</a>"#.to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_response(format!("found@{}", domain)))
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(CrawlLimits::default());
    let report = crawler.crawl(&domain).await.expect("Crawl failed");

    assert_eq!(report.emails, set(&[format!("found@{}", domain)]));
    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.failed_fetches, 1);
}

#[tokio::test]
async fn test_recrawl_yields_same_emails() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);
    mount_small_site(&mock_server, &domain).await;

    let crawler = create_test_crawler(CrawlLimits::default());
    let first = crawler.crawl(&domain).await.expect("Crawl failed");
    let second = crawler.crawl(&domain).await.expect("Crawl failed");

    assert_eq!(first.emails, second.emails);
    assert_eq!(first.pages_visited, second.pages_visited);
}

#[tokio::test]
async fn test_page_limited_crawl_is_repeatable() {
    let mock_server = MockServer::start().await;
    let domain = domain_of(&mock_server);

    let links: String = (1..=9)
        .map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!("<html><body>{}</body></html>", links)))
        .mount(&mock_server)
        .await;

    for i in 1..=9 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(html_response(format!("p{}@{}", i, domain)))
            .mount(&mock_server)
            .await;
    }

    // The seed plus the first two links in document order
    let expected = set(&[format!("p1@{}", domain), format!("p2@{}", domain)]);
    for _ in 0..8 {
        let crawler = create_test_crawler(CrawlLimits::new(3, 10));
        let report = crawler.crawl(&domain).await.expect("Crawl failed");
        assert_eq!(report.pages_visited, 3);
        assert_eq!(report.emails, expected);
    }
}

#[tokio::test]
async fn test_not_modified_is_success_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cached"))
        .respond_with(ResponseTemplate::new(304))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(&crate::common::test_fetcher_config()).unwrap();
    let result = fetcher
        .fetch(&format!("{}/cached", mock_server.uri()))
        .await;

    assert_eq!(
        result,
        FetchResult::Success {
            status_code: 304,
            body: String::new(),
            byte_size: 0,
        }
    );
}

//! End-to-end crawl tests against mock HTTP servers

use pagesift::{CancelToken, CrawlOptions, Crawler};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Options tuned for tests: no politeness delay, short timeout
fn test_options() -> CrawlOptions {
    CrawlOptions {
        rate_limit_ms: 0,
        timeout_ms: 5_000,
        ..CrawlOptions::default()
    }
}

/// Builds an HTML page whose extracted content clears the 100-char floor
fn page_html(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><main><p>{}</p>{}</main></body></html>",
        title,
        "This paragraph pads the page body well past the minimum length the extractor accepts. "
            .repeat(3),
        anchors
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a page that must never be requested
async fn mount_never(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(page_html("never", &[]), "text/html"),
        )
        .expect(0)
        .mount(server)
        .await;
}

fn page_paths(result: &pagesift::CrawlResult) -> Vec<String> {
    result
        .pages
        .iter()
        .map(|page| Url::parse(&page.url).unwrap().path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_breadth_first() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/a", "/b"])).await;
    mount_page(&server, "/a", page_html("A", &["/c"])).await;
    mount_page(&server, "/b", page_html("B", &[])).await;
    mount_page(&server, "/c", page_html("C", &[])).await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(page_paths(&result), vec!["/", "/a", "/b", "/c"]);

    let depths: Vec<u32> = result.pages.iter().map(|page| page.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2]);

    assert!(result.errors.is_empty());
    assert_eq!(result.stats.total_pages, 4);
    assert_eq!(result.stats.successful_pages, 4);
    assert_eq!(result.stats.failed_pages, 0);
    assert_eq!(result.stats.skipped_pages, 0);

    // Titles and content came through extraction
    assert_eq!(result.pages[0].title, "Home");
    assert!(result.pages[0].content.len() >= 100);
}

#[tokio::test]
async fn test_page_urls_are_unique() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/a", "/a", "/"])).await;
    mount_page(&server, "/a", page_html("A", &["/", "/a"])).await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    let mut urls: Vec<_> = result.pages.iter().map(|page| page.url.clone()).collect();
    let before = urls.len();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), before);
}

#[tokio::test]
async fn test_invalid_seed_scheme_is_fatal() {
    let crawler = Crawler::new(test_options()).unwrap();

    let error = crawler
        .crawl("ftp://example.com")
        .await
        .err()
        .expect("ftp seed must be rejected");
    assert_eq!(error.to_string(), "Invalid URL provided");
}

#[tokio::test]
async fn test_zero_depth_crawls_only_the_seed() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/a", "/b", "/c"])).await;
    mount_never(&server, "/a").await;
    mount_never(&server, "/b").await;
    mount_never(&server, "/c").await;

    let options = CrawlOptions {
        max_depth: 0,
        ..test_options()
    };
    let crawler = Crawler::new(options).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.stats.successful_pages, 1);
    assert_eq!(result.stats.total_pages, 1);
    assert_eq!(result.pages[0].depth, 0);
}

#[tokio::test]
async fn test_page_cap_stops_without_draining_frontier() {
    let server = MockServer::start().await;

    let links: Vec<String> = (1..=5).map(|i| format!("/page{}", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_page(&server, "/", page_html("Home", &link_refs)).await;
    for link in &links {
        mount_never(&server, link).await;
    }

    let options = CrawlOptions {
        max_pages: 1,
        ..test_options()
    };
    let crawler = Crawler::new(options).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.pages.len(), 1);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_depth_limit_cuts_the_chain() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Root", &["/l1"])).await;
    mount_page(&server, "/l1", page_html("L1", &["/l2"])).await;
    mount_page(&server, "/l2", page_html("L2", &["/l3"])).await;
    mount_never(&server, "/l3").await;

    let options = CrawlOptions {
        max_depth: 2,
        ..test_options()
    };
    let crawler = Crawler::new(options).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.stats.successful_pages, 3);
    assert!(result.pages.iter().all(|page| page.depth <= 2));
}

#[tokio::test]
async fn test_non_html_response_recorded_as_error() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/download"])).await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]) // %PDF
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.stats.successful_pages, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].url.ends_with("/download"));
    assert!(result.errors[0].error.contains("Not HTML content"));
    assert!(!result.pages.iter().any(|page| page.url.ends_with("/download")));
}

#[tokio::test]
async fn test_insufficient_content_recorded_as_error() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/thin"])).await;
    mount_page(
        &server,
        "/thin",
        "<html><head><title>Thin</title></head><body><main>tiny</main></body></html>".to_string(),
    )
    .await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].error, "Insufficient content extracted");

    // The failed page still consumed a visited slot
    assert_eq!(result.stats.total_pages, 2);
    assert_eq!(
        result.stats.total_pages,
        result.stats.successful_pages + result.stats.failed_pages + result.stats.skipped_pages
    );
}

#[tokio::test]
async fn test_http_error_recorded_and_crawl_continues() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/missing", "/ok"])).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", page_html("Ok", &[])).await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].error, "HTTP 404: Not Found");
    assert_eq!(result.stats.successful_pages, 2);
}

#[tokio::test]
async fn test_timeout_recorded_as_error() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/slow"])).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page_html("Slow", &[]), "text/html")
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let options = CrawlOptions {
        timeout_ms: 200,
        ..test_options()
    };
    let crawler = Crawler::new(options).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].error, "Request timeout");
}

#[tokio::test]
async fn test_canonical_variants_visited_once() {
    let server = MockServer::start().await;

    let about_absolute = format!("{}/about", server.uri());
    let links = [
        "/about",
        "/about/",
        "/about#section",
        about_absolute.as_str(),
    ];
    mount_page(&server, "/", page_html("Home", &links)).await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page_html("About", &[]), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.stats.successful_pages, 2);
}

#[tokio::test]
async fn test_same_domain_containment() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page_html("Home", &["https://elsewhere.invalid/offsite", "/local"]),
    )
    .await;
    mount_page(&server, "/local", page_html("Local", &[])).await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    let seed_host = Url::parse(&server.uri()).unwrap().host_str().unwrap().to_string();
    for page in &result.pages {
        assert_eq!(
            Url::parse(&page.url).unwrap().host_str(),
            Some(seed_host.as_str())
        );
    }

    // A filtered link is a silent skip, never an error
    assert!(result.errors.is_empty());
    assert_eq!(result.stats.successful_pages, 2);
}

#[tokio::test]
async fn test_asset_and_admin_links_never_fetched() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        page_html(
            "Home",
            &["/file.pdf", "/logo.png", "/wp-admin/index", "/login", "/ok"],
        ),
    )
    .await;
    mount_never(&server, "/file.pdf").await;
    mount_never(&server, "/logo.png").await;
    mount_never(&server, "/wp-admin/index").await;
    mount_never(&server, "/login").await;
    mount_page(&server, "/ok", page_html("Ok", &[])).await;

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.stats.successful_pages, 2);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_politeness_delay_spaces_attempts() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/a", "/b"])).await;
    mount_page(&server, "/a", page_html("A", &[])).await;
    mount_page(&server, "/b", page_html("B", &[])).await;

    let options = CrawlOptions {
        rate_limit_ms: 150,
        ..test_options()
    };
    let crawler = Crawler::new(options).unwrap();
    let result = crawler.crawl(&server.uri()).await.unwrap();

    assert_eq!(result.stats.successful_pages, 3);
    // Two delayed attempts after the first fetch
    assert!(result.stats.crawl_duration_ms >= 300);
}

#[tokio::test]
async fn test_precancelled_token_stops_immediately() {
    let server = MockServer::start().await;
    mount_never(&server, "/").await;

    let cancel = CancelToken::new();
    cancel.cancel();

    let crawler = Crawler::new(test_options()).unwrap();
    let result = crawler
        .crawl_with_cancel(&server.uri(), &cancel)
        .await
        .unwrap();

    assert!(result.pages.is_empty());
    assert!(result.errors.is_empty());
    assert_eq!(result.stats.total_pages, 0);
}

#[tokio::test]
async fn test_cancellation_stops_the_loop() {
    let server = MockServer::start().await;

    mount_page(&server, "/", page_html("Home", &["/a", "/b"])).await;
    mount_page(&server, "/a", page_html("A", &[])).await;
    mount_page(&server, "/b", page_html("B", &[])).await;

    let options = CrawlOptions {
        rate_limit_ms: 5_000,
        ..test_options()
    };
    let crawler = Crawler::new(options).unwrap();

    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let result = crawler
        .crawl_with_cancel(&server.uri(), &cancel)
        .await
        .unwrap();

    // The seed completes before the first politeness sleep; cancellation
    // aborts the sleep, so nothing else is fetched.
    assert_eq!(result.stats.successful_pages, 1);
    assert_eq!(
        result.stats.total_pages,
        result.stats.successful_pages + result.stats.failed_pages + result.stats.skipped_pages
    );
}

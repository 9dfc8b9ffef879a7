//! Integration tests for the scraper
//!
//! These tests use wiremock to stand in for the target site and exercise the
//! full crawl-extract-dedup cycle end-to-end.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yelpscrap::config::{Config, OutputConfig, ScraperConfig, SearchConfig};
use yelpscrap::scraper::{DelayPolicy, PageSource, Scraper};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, cflts: Vec<String>) -> Config {
    Config {
        search: SearchConfig {
            base_url: base_url.to_string(),
            city: "Paris".to_string(),
            districts: vec![],
            cflts,
        },
        scraper: ScraperConfig::default(),
        output: OutputConfig::default(),
    }
}

/// Builds a scraper with live HTTP against the mock server and no delays
fn create_test_scraper(config: Config) -> Scraper {
    let client = yelpscrap::scraper::build_http_client().expect("Failed to build client");
    Scraper::with_parts(config, PageSource::Http(client), DelayPolicy::Disabled)
}

/// One well-formed result block
fn shop_block(name: &str, href: &str, phone: &str) -> String {
    format!(
        r#"<div class="search-result">
            <a class="biz-name" href="{href}">{name}</a>
            <address>12 Rue de Something, 75002 Paris</address>
            <span class="biz-phone">{phone}</span>
            <span class="neighborhood-str-list">Sentier</span>
            <span class="category-str-list"><a href="/c/burgers">Burgers</a></span>
        </div>"#
    )
}

/// A result block flagged as a paid placement
fn ad_block() -> String {
    r#"<div class="search-result">
        <span class="yloca-tip">Annonce</span>
        <a class="biz-name" href="/biz/sponsored">Sponsored</a>
        <address>1 Rue Payante, 75001 Paris</address>
        <span class="biz-phone">01 00 00 00 00</span>
    </div>"#
        .to_string()
}

/// A result block missing its phone (required field)
fn malformed_block() -> String {
    r#"<div class="search-result">
        <a class="biz-name" href="/biz/broken">Broken</a>
        <address>3 Rue Cassée, 75003 Paris</address>
    </div>"#
        .to_string()
}

fn results_page(blocks: &[String]) -> String {
    format!("<html><body>{}</body></html>", blocks.join("\n"))
}

fn empty_page() -> String {
    "<html><body><p>Aucun résultat</p></body></html>".to_string()
}

#[tokio::test]
async fn test_two_page_category_with_ads_and_malformed_blocks() {
    let mock_server = MockServer::start().await;

    // Page 1: 2 valid + 1 ad + 1 malformed
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .and(query_param("cflt", "burgers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
            shop_block("Chez Marcel", "/biz/chez-marcel-paris", "01 11 11 11 11"),
            ad_block(),
            malformed_block(),
            shop_block("Le Comptoir", "/biz/le-comptoir-paris", "01 22 22 22 22"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 2: zero result blocks, terminates the category
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);
    scraper.run().await.expect("Scrape failed");

    // Exactly 2 fetch attempts are verified by the expect() counts above
    let shops = scraper.into_shops();
    assert_eq!(shops.len(), 2);
    assert_eq!(shops[0].name, "Chez Marcel");
    assert_eq!(shops[0].zip_code, "75002");
    assert_eq!(shops[1].name, "Le Comptoir");
}

#[tokio::test]
async fn test_duplicate_urls_keep_first_seen() {
    let mock_server = MockServer::start().await;

    // Two blocks with the same canonical URL but different phones
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
            shop_block("Chez Marcel", "/biz/chez-marcel-paris", "01 11 11 11 11"),
            shop_block("Chez Marcel", "/biz/chez-marcel-paris", "09 99 99 99 99"),
        ])))
        .mount(&mock_server)
        .await;

    // The duplicate page still accepted one shop, so pagination continues
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);
    scraper.run().await.expect("Scrape failed");

    let shops = scraper.into_shops();
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0].phone, "01 11 11 11 11");
}

#[tokio::test]
async fn test_all_ad_page_terminates_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&[ad_block(), ad_block()])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // No start=10 mock: an ad-only first page must end the category without
    // another fetch (unmatched requests would 404 and fail the run).
    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);
    scraper.run().await.expect("Scrape failed");

    assert!(scraper.into_shops().is_empty());
}

#[tokio::test]
async fn test_categories_are_crawled_in_order_and_share_dedup() {
    let mock_server = MockServer::start().await;

    // burgers page 1 and sandwiches page 1 return the same shop
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .and(query_param("cflt", "burgers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[shop_block(
            "Chez Marcel",
            "/biz/chez-marcel-paris",
            "01 11 11 11 11",
        )])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .and(query_param("cflt", "burgers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .mount(&mock_server)
        .await;

    // The sandwiches category only serves the duplicate, so its first page
    // accepts nothing and it stops after one fetch.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .and(query_param("cflt", "sandwiches"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[shop_block(
            "Chez Marcel",
            "/biz/chez-marcel-paris",
            "01 11 11 11 11",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &mock_server.uri(),
        vec!["burgers".to_string(), "sandwiches".to_string()],
    );
    let mut scraper = create_test_scraper(config);
    scraper.run().await.expect("Scrape failed");

    assert_eq!(scraper.into_shops().len(), 1);
}

#[tokio::test]
async fn test_transient_server_errors_are_retried() {
    let mock_server = MockServer::start().await;

    // Two 503s, then the real (empty) page: the fetcher retries through the
    // transient failures and the run succeeds on the third attempt.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);
    scraper.run().await.expect("Scrape should survive transient errors");

    assert!(scraper.into_shops().is_empty());
}

#[tokio::test]
async fn test_persistent_server_error_fails_after_three_attempts() {
    let mock_server = MockServer::start().await;

    // Exactly 3 attempts: the first try plus two retries, no more
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);

    let result = scraper.run().await;
    assert!(matches!(
        result,
        Err(yelpscrap::ScrapError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    // A 404 must fail on the first attempt; a second request would overrun
    // the expect() count.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);

    let result = scraper.run().await;
    assert!(matches!(
        result,
        Err(yelpscrap::ScrapError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_http_error_aborts_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);

    let result = scraper.run().await;
    assert!(result.is_err());

    // Nothing accumulated, but the collector is still usable for export
    assert!(scraper.into_shops().is_empty());
}

#[tokio::test]
async fn test_shops_survive_failure_for_best_effort_export() {
    let mock_server = MockServer::start().await;

    // Page 1 succeeds, page 2 blows up
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[shop_block(
            "Chez Marcel",
            "/biz/chez-marcel-paris",
            "01 11 11 11 11",
        )])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    let mut scraper = create_test_scraper(config);

    assert!(scraper.run().await.is_err());

    // The shop accepted before the failure is still there
    let shops = scraper.into_shops();
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0].url, "/biz/chez-marcel-paris");
}

#[tokio::test]
async fn test_district_scoping_reaches_the_wire() {
    let mock_server = MockServer::start().await;

    // The l= parameter carries the bracketed district list alongside find_loc
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .and(query_param("find_loc", "Paris"))
        .and(query_param("l", "p:FR-75:Paris::[Sentier,Les_Halles]"))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), vec!["burgers".to_string()]);
    config.search.districts = vec!["Sentier".to_string(), "Les_Halles".to_string()];

    let mut scraper = create_test_scraper(config);
    scraper.run().await.expect("Scrape failed");

    assert!(scraper.into_shops().is_empty());
}

#[tokio::test]
async fn test_fixture_mode_needs_no_network() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        results_page(&[shop_block(
            "Chez Marcel",
            "/biz/chez-marcel-paris",
            "01 11 11 11 11",
        )])
        .as_bytes(),
    )
    .unwrap();
    file.flush().unwrap();

    // Base URL points nowhere reachable; the fixture source never dials it
    let config = create_test_config("http://127.0.0.1:1", vec!["burgers".to_string()]);
    let mut scraper = Scraper::with_parts(
        config,
        PageSource::Fixture(file.path().to_path_buf()),
        DelayPolicy::Disabled,
    );

    scraper.run().await.expect("Fixture scrape failed");
    assert_eq!(scraper.into_shops().len(), 1);
}

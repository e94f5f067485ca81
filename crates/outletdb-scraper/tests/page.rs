//! Integration tests for the locator page loader.

use outletdb_scraper::{build_client, fetch_locator_html, load_html_file, ScraperError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"<html><body><div class="addressBox"></div></body></html>"#;

fn client() -> reqwest::Client {
    build_client(5, "outletdb-test/0.1").expect("client")
}

#[tokio::test]
async fn fetch_returns_listing_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locate-us"))
        .and(header("user-agent", "outletdb-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/locate-us", server.uri());
    let html = fetch_locator_html(&client(), &url).await.expect("fetch");
    assert!(html.contains("addressBox"));
}

#[tokio::test]
async fn non_success_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/locate-us", server.uri());
    let err = fetch_locator_html(&client(), &url)
        .await
        .expect_err("should fail");
    assert!(matches!(err, ScraperError::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn empty_body_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let url = format!("{}/locate-us", server.uri());
    let err = fetch_locator_html(&client(), &url)
        .await
        .expect_err("should fail");
    assert!(matches!(err, ScraperError::EmptyPage { .. }));
}

#[tokio::test]
async fn snapshot_file_is_loaded() {
    let path = std::env::temp_dir().join(format!("outletdb-snapshot-{}.html", std::process::id()));
    tokio::fs::write(&path, LISTING).await.expect("write snapshot");

    let html = load_html_file(&path).await.expect("load");
    assert_eq!(html, LISTING);

    tokio::fs::remove_file(&path).await.expect("cleanup");
}

#[tokio::test]
async fn missing_snapshot_is_reported() {
    let path = std::env::temp_dir().join("outletdb-does-not-exist.html");
    let err = load_html_file(&path).await.expect_err("should fail");
    assert!(matches!(err, ScraperError::Snapshot { .. }));
}

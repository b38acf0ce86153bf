//! Integration tests for `IndexChecker` against a mock search API.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use index_check_lib::{
    summarize, CheckConfig, IndexCheckError, IndexChecker, IndexStatus, LocaleSelection,
    ProgressEvent,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Checker pointed at the mock server, with pacing disabled.
fn test_checker(server: &MockServer) -> IndexChecker {
    let config = CheckConfig::default()
        .with_endpoint(format!("{}/search", server.uri()))
        .with_timeout(Duration::from_secs(5))
        .with_group_delay(Duration::ZERO)
        .with_sequential_delay(Duration::ZERO);
    IndexChecker::with_config(config).expect("failed to build test IndexChecker")
}

fn indexed_body(title: &str) -> serde_json::Value {
    json!({
        "request_info": { "success": true },
        "organic_results": [{ "position": 1, "title": title, "link": "https://example.com/" }]
    })
}

fn not_indexed_body() -> serde_json::Value {
    json!({ "request_info": { "success": true }, "organic_results": [] })
}

#[tokio::test]
async fn check_url_sends_site_query_with_locale() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("q", "site:example.com/about"))
        .and(query_param("num", "1"))
        .and(query_param("gl", "fr"))
        .and(query_param("hl", "fr"))
        .and(query_param("google_domain", "google.fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(indexed_body("About us")))
        .expect(1)
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let locale = LocaleSelection::resolve("France", "French", "Google France").unwrap();
    let result = checker
        .check_url("example.com/about", "test-key", &locale)
        .await;

    assert_eq!(result.status, IndexStatus::Indexed);
    assert_eq!(result.title, "About us");
    assert_eq!(result.url, "example.com/about");
}

#[tokio::test]
async fn check_url_reports_not_indexed_for_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_indexed_body()))
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let result = checker
        .check_url("example.com/missing", "test-key", &LocaleSelection::default())
        .await;

    assert_eq!(result.status, IndexStatus::NotIndexed);
    assert!(result.title.is_empty());
}

#[tokio::test]
async fn check_url_reports_not_indexed_when_results_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "request_info": { "success": true } })),
        )
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let result = checker
        .check_url("example.com/", "test-key", &LocaleSelection::default())
        .await;

    assert_eq!(result.status, IndexStatus::NotIndexed);
}

#[tokio::test]
async fn check_url_turns_http_error_into_error_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "request_info": { "success": false, "message": "Invalid API key" } })),
        )
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let result = checker
        .check_url("example.com/", "bad-key", &LocaleSelection::default())
        .await;

    assert_eq!(result.status, IndexStatus::Error);
    assert_eq!(result.title, "HTTP 401: Invalid API key");
}

#[tokio::test]
async fn check_url_uses_canonical_reason_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let result = checker
        .check_url("example.com/", "test-key", &LocaleSelection::default())
        .await;

    assert_eq!(result.status, IndexStatus::Error);
    assert_eq!(result.title, "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn check_url_turns_invalid_json_into_error_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let result = checker
        .check_url("example.com/", "test-key", &LocaleSelection::default())
        .await;

    assert_eq!(result.status, IndexStatus::Error);
    assert!(result.title.starts_with("Parse error:"), "got: {}", result.title);
}

#[tokio::test]
async fn check_url_turns_unsuccessful_body_into_error_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_info": { "success": false, "message": "Credits exhausted" }
        })))
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let result = checker
        .check_url("example.com/", "test-key", &LocaleSelection::default())
        .await;

    assert_eq!(result.status, IndexStatus::Error);
    assert_eq!(result.title, "API error: Credits exhausted");
}

#[tokio::test]
async fn check_url_times_out_on_stalled_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(not_indexed_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = CheckConfig::default()
        .with_endpoint(format!("{}/search", server.uri()))
        .with_timeout(Duration::from_millis(200));
    let checker = IndexChecker::with_config(config).unwrap();
    let result = checker
        .check_url("example.com/", "test-key", &LocaleSelection::default())
        .await;

    assert_eq!(result.status, IndexStatus::Error);
    assert!(result.title.starts_with("Timeout"), "got: {}", result.title);
    assert!(result.title.contains("200ms"), "got: {}", result.title);
}

#[tokio::test]
async fn check_urls_keeps_input_order_with_partial_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:a.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(indexed_body("A")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:b.test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(not_indexed_body())
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "site:c.test"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let checker = IndexChecker::with_config(
        CheckConfig::default()
            .with_endpoint(format!("{}/search", server.uri()))
            .with_concurrency(2)
            .with_group_delay(Duration::ZERO),
    )
    .unwrap();

    let urls: Vec<String> = ["b.test", "a.test", "c.test", "a.test"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut events: Vec<ProgressEvent> = Vec::new();
    let batch = checker
        .check_urls(&urls, "test-key", |event| events.push(event))
        .await
        .unwrap();

    let statuses: Vec<(&str, IndexStatus)> = batch
        .iter()
        .map(|r| (r.url.as_str(), r.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("b.test", IndexStatus::NotIndexed),
            ("a.test", IndexStatus::Indexed),
            ("c.test", IndexStatus::Error),
            ("a.test", IndexStatus::Indexed),
        ]
    );

    let completed: Vec<usize> = events.iter().map(|e| e.completed).collect();
    assert_eq!(completed, vec![2, 4]);
    assert!(events.iter().all(|e| e.total == 4));

    let report = summarize(&batch);
    assert_eq!(report.indexed.count, 2);
    assert_eq!(report.not_indexed.count, 1);
    assert_eq!(report.errors.count, 1);
    assert_eq!(report.indexed.percentage, 50.0);
}

#[tokio::test]
async fn check_urls_rejects_missing_key_without_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_indexed_body()))
        .expect(0)
        .mount(&server)
        .await;

    let checker = test_checker(&server);
    let urls = vec!["example.com".to_string()];

    let err = checker.check_urls(&urls, "", |_| {}).await.unwrap_err();
    assert!(matches!(err, IndexCheckError::Validation { .. }));

    let err = checker.check_urls(&[], "test-key", |_| {}).await.unwrap_err();
    assert!(err.to_string().contains("at least one URL"));
}

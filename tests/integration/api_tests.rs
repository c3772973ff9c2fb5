//! Notification and search client tests against a mock provider

use crate::common::{NOTIFY_PATH, SEARCH_PATH, TOKEN};
use serde_json::json;
use sitemap_indexer::api::{ApiError, HttpIndexingClient, HttpSearchClient, IndexingApi, SearchApi};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn indexing_client(server: &MockServer) -> HttpIndexingClient {
    HttpIndexingClient::new(
        reqwest::Client::new(),
        format!("{}{}", server.uri(), NOTIFY_PATH),
        TOKEN,
    )
}

fn search_client(server: &MockServer) -> HttpSearchClient {
    HttpSearchClient::new(
        reqwest::Client::new(),
        format!("{}{}", server.uri(), SEARCH_PATH),
        "test-key",
        "test-cx",
    )
}

#[tokio::test]
async fn test_publish_sends_url_updated_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(NOTIFY_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "url": "https://site.example/a",
            "type": "URL_UPDATED"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urlNotificationMetadata": { "url": "https://site.example/a" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = indexing_client(&server).publish("https://site.example/a").await;
    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_publish_http_429_is_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let err = indexing_client(&server)
        .publish("https://site.example/a")
        .await
        .unwrap_err();
    assert!(err.is_quota());
}

#[tokio::test]
async fn test_publish_error_code_429_is_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 429, "message": "Quota exceeded for quota metric" }
        })))
        .mount(&server)
        .await;

    let err = indexing_client(&server)
        .publish("https://site.example/a")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::QuotaExceeded("Quota exceeded for quota metric".to_string())
    );
}

#[tokio::test]
async fn test_publish_permission_error_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Permission denied" }
        })))
        .mount(&server)
        .await;

    let err = indexing_client(&server)
        .publish("https://site.example/a")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Provider {
            code: 403,
            message: "Permission denied".to_string()
        }
    );
}

#[tokio::test]
async fn test_publish_non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = indexing_client(&server)
        .publish("https://site.example/a")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn test_search_finds_indexed_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "site:https://site.example/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "link": "https://site.example/a" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let indexed = search_client(&server)
        .is_indexed("https://site.example/a")
        .await
        .unwrap();
    assert!(indexed);
}

#[tokio::test]
async fn test_search_without_items_is_not_indexed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchInformation": { "totalResults": "0" }
        })))
        .mount(&server)
        .await;

    let indexed = search_client(&server)
        .is_indexed("https://site.example/a")
        .await
        .unwrap();
    assert!(!indexed);
}

#[tokio::test]
async fn test_search_quota() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Daily Limit Exceeded" }
        })))
        .mount(&server)
        .await;

    let err = search_client(&server)
        .is_indexed("https://site.example/a")
        .await
        .unwrap_err();
    assert!(err.is_quota());
}

#[tokio::test]
async fn test_search_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = search_client(&server)
        .is_indexed("https://site.example/a")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Provider {
            code: 500,
            message: "HTTP 500".to_string()
        }
    );
}

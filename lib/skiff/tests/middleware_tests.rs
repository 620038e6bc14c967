//! Integration tests for middleware functionality.

use skiff::middleware::{NoToken, StaticToken};
use skiff::{Error, HttpClient, HyperClient, Method, Request};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token auth middleware adds the Authorization header to flagged
/// requests.
#[tokio::test]
async fn test_token_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("Authorization", "Bearer my-secret-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"user": "alice"})),
        )
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .with_token_auth(StaticToken::new("my-secret-token"))
        .build();

    let url = url::Url::parse(&format!("{}/protected", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).require_auth(true).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

/// Unflagged requests pass through the token auth middleware untouched.
#[tokio::test]
async fn test_token_auth_skips_unflagged_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .with_token_auth(StaticToken::new("my-secret-token"))
        .build();

    let url = url::Url::parse(&format!("{}/public", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let response = client.execute(request).await.expect("response");
    assert!(response.is_success());

    let received = mock_server.received_requests().await.expect("requests");
    let request = received.first().expect("one request");
    assert!(!request.headers.contains_key("authorization"));
}

/// A flagged request with no available token is rejected before any
/// network dispatch.
#[tokio::test]
async fn test_token_auth_rejects_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_token_auth(NoToken).build();

    let url = url::Url::parse(&format!("{}/protected", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).require_auth(true).build();

    let err = client.execute(request).await.expect_err("should fail");
    assert!(matches!(err, Error::MissingToken), "got: {err}");
}

/// Logging middleware doesn't break the request/response flow.
#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged": true})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_logging().build();

    let url = url::Url::parse(&format!("{}/logged", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

/// Logging and token auth composed together.
#[tokio::test]
async fn test_middleware_composition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/composed"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"composed": true})),
        )
        .mount(&mock_server)
        .await;

    // Compose: logging -> token auth
    let client = HyperClient::builder()
        .with_logging()
        .with_token_auth(StaticToken::new("test-token"))
        .build();

    let url = url::Url::parse(&format!("{}/composed", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Post, url).require_auth(true).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

/// Debug logging level passes requests through unchanged.
#[tokio::test]
async fn test_debug_logging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/debug"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_debug_logging().build();

    let url = url::Url::parse(&format!("{}/debug", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

/// The generic layer API accepts a raw layer.
#[tokio::test]
async fn test_generic_layer_api() {
    use skiff::middleware::TokenAuthLayer;

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/custom-layer"))
        .and(header("Authorization", "Bearer custom-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    // Use generic .layer() API instead of the helper
    let client = HyperClient::builder()
        .layer(TokenAuthLayer::new(StaticToken::new("custom-token")))
        .build();

    let url = url::Url::parse(&format!("{}/custom-layer", mock_server.uri())).expect("url");
    let request = Request::builder(Method::Get, url).require_auth(true).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! HTTP-level tests for `ProxyAdminClient` against a mock control API.

use domain_provision_client::{ClientError, ProxyAdmin, ProxyAdminClient, RemoveRouteOutcome};
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn add_route_returns_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/routes"))
        .and(body_json(json!({"host": "example.org"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "rt1",
            "host": "example.org"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProxyAdminClient::new(server.uri(), None);
    let route = client.add_route("example.org").await.unwrap();
    assert_eq!(route.id, "rt1");
    assert_eq!(route.host, "example.org");
}

#[tokio::test]
async fn add_route_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/routes"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "rt1",
            "host": "example.org"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ProxyAdminClient::new(server.uri(), Some("admin-secret".to_string()));
    client.add_route("example.org").await.unwrap();
}

#[tokio::test]
async fn add_route_conflict_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/routes"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "host already routed"})),
        )
        .mount(&server)
        .await;

    let client = ProxyAdminClient::new(server.uri(), None);
    let err = client.add_route("example.org").await.unwrap_err();
    assert!(
        matches!(err, ClientError::ApiError { status: 409, ref message, .. } if message == "host already routed"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn remove_route_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/routes/rt1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ProxyAdminClient::new(server.uri(), None);
    let outcome = client.remove_route("rt1").await.unwrap();
    assert_eq!(outcome, RemoveRouteOutcome::Removed);
}

#[tokio::test]
async fn remove_route_not_found_converges() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/routes/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such route"})))
        .mount(&server)
        .await;

    let client = ProxyAdminClient::new(server.uri(), None);
    let outcome = client.remove_route("gone").await.unwrap();
    assert_eq!(outcome, RemoveRouteOutcome::AlreadyAbsent);
}

#[tokio::test]
async fn route_health_parses_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/rt1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "healthy": false,
            "detail": "certificate pending"
        })))
        .mount(&server)
        .await;

    let client = ProxyAdminClient::new(server.uri(), None);
    let health = client.route_health("rt1").await.unwrap();
    assert!(!health.healthy);
    assert_eq!(health.detail.as_deref(), Some("certificate pending"));
}

#[tokio::test]
async fn route_health_unknown_route_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/missing/health"))
        .respond_with(ResponseTemplate::new(404).set_body_string(""))
        .mount(&server)
        .await;

    let client = ProxyAdminClient::new(server.uri(), None);
    let err = client.route_health("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { ref resource, .. } if resource == "missing"));
}

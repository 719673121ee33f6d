#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! HTTP-level tests for `MailerClient` against a mock mail API.

use domain_provision_client::{ClientError, MailerClient, NotificationSink};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn send_posts_message_with_sender() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_json(json!({
            "from": "noreply@platform.test",
            "to": "owner@example.org",
            "subject": "Domain ready",
            "html": "<p>done</p>",
            "text": "done"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = MailerClient::new(server.uri(), "mail-key", "noreply@platform.test");
    client
        .send("owner@example.org", "Domain ready", "<p>done</p>", "done")
        .await
        .unwrap();
}

#[tokio::test]
async fn send_bad_key_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = MailerClient::new(server.uri(), "wrong", "noreply@platform.test");
    let err = client
        .send("owner@example.org", "s", "h", "t")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials { .. }));
}

#[tokio::test]
async fn send_server_error_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("queue full"))
        .mount(&server)
        .await;

    let client = MailerClient::new(server.uri(), "mail-key", "noreply@platform.test");
    let err = client
        .send("owner@example.org", "s", "h", "t")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::ApiError { status: 503, ref message, .. } if message == "queue full")
    );
}

//! Generic HTTP request execution shared by the concrete clients.
//!
//! Unifies sending, logging, and transport-error classification so each
//! client only deals with its own response envelope. There is deliberately no
//! retry here: a failed call is retried by the next reconciliation cycle.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum response-body length echoed into debug logs.
const LOG_BODY_MAX: usize = 2048;

/// Create an HTTP client with the standard timeout configuration.
///
/// Falls back to the library default client if the builder fails, which only
/// happens when the TLS backend cannot initialize.
#[must_use]
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

/// Strip trailing slashes from a configured base URL so path joins are
/// predictable.
#[must_use]
pub fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Truncate a response body for logging.
fn truncate_for_log(body: &str) -> &str {
    if body.len() <= LOG_BODY_MAX {
        body
    } else {
        // Truncation can land mid-codepoint; back off to a char boundary.
        let mut end = LOG_BODY_MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        &body[..end]
    }
}

/// HTTP utility function set.
pub struct HttpUtils;

impl HttpUtils {
    /// Execute a request and return `(status_code, response_text)`.
    ///
    /// Transport-level failures map to `Timeout` or `NetworkError`; all HTTP
    /// statuses are returned to the caller for envelope-specific handling.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        service: &str,
        method: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ClientError> {
        log::debug!("[{service}] {method} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    service: service.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    service: service.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{service}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError {
                service: service.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{service}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, service: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{service}] JSON parse failed: {e}");
            log::error!(
                "[{service}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ClientError::ParseError {
                service: service.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ClientError> = HttpUtils::parse_json(r#"{"x":42}"#, "zone");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ClientError> = HttpUtils::parse_json("not json", "zone");
        assert!(
            matches!(&result, Err(ClientError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn truncate_short_body_unchanged() {
        assert_eq!(truncate_for_log("abc"), "abc");
    }

    #[test]
    fn truncate_long_body_capped() {
        let body = "x".repeat(LOG_BODY_MAX + 100);
        assert_eq!(truncate_for_log(&body).len(), LOG_BODY_MAX);
    }

    #[test]
    fn truncate_respects_char_boundary() {
        let body = "é".repeat(LOG_BODY_MAX);
        let truncated = truncate_for_log(&body);
        assert!(truncated.len() <= LOG_BODY_MAX);
        assert!(body.is_char_boundary(truncated.len()));
    }
}

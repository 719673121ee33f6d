//! Wire types for the proxy admin API.

use serde::Deserialize;

/// Route payload: `{"id": "...", "host": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RoutePayload {
    pub id: String,
    pub host: String,
}

/// Health payload: `{"healthy": bool, "detail": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct HealthPayload {
    pub healthy: bool,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Error payload: `{"error": "message"}`; plain-text bodies are tolerated.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

pub(crate) fn extract_api_error(body: &str) -> String {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => payload.error,
        Err(_) if body.is_empty() => "Unknown error".to_string(),
        Err(_) => body.to_string(),
    }
}

//! Wire types for the zone provider API.

use serde::Deserialize;

/// Success envelope: `{"zone": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ZoneEnvelope {
    pub zone: ZonePayload,
}

/// Provider representation of a hosted zone.
#[derive(Debug, Deserialize)]
pub(crate) struct ZonePayload {
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub nameservers: Vec<String>,
}

/// Error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// Extract `(code, message)` from an error body, tolerating non-JSON bodies.
pub(crate) fn extract_api_error(body: &str) -> (Option<String>, String) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message),
        Err(_) => (
            None,
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            },
        ),
    }
}

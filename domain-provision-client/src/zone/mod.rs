//! Hosted-zone provider client.

mod api;
mod http;
mod types;

use reqwest::Client;

use crate::http::{create_http_client, normalize_base_url};

pub(crate) use types::{ZoneEnvelope, ZonePayload};

/// Service name used in logs and error variants.
pub(crate) const ZONE_SERVICE: &str = "zone";

/// Thin client for the DNS/zone provider's REST API.
///
/// Stateless: every operation is a single HTTP call. Construct once and share;
/// the underlying `reqwest::Client` pools connections.
pub struct HostedZoneClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_token: String,
}

impl HostedZoneClient {
    /// Create a client against `base_url` (no trailing slash) authenticating
    /// with `api_token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client: create_http_client(),
            base_url: normalize_base_url(base_url.into()),
            api_token: api_token.into(),
        }
    }
}

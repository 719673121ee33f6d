//! Reverse-proxy control API client.

mod api;
mod types;

use reqwest::Client;

use crate::http::{create_http_client, normalize_base_url};

/// Service name used in logs and error variants.
pub(crate) const PROXY_SERVICE: &str = "proxy";

/// Thin client for the reverse-proxy admin API.
///
/// The admin endpoint is typically only reachable from the platform network;
/// authentication is an optional bearer token.
pub struct ProxyAdminClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) admin_token: Option<String>,
}

impl ProxyAdminClient {
    /// Create a client against the proxy admin `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, admin_token: Option<String>) -> Self {
        Self {
            client: create_http_client(),
            base_url: normalize_base_url(base_url.into()),
            admin_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_strips_trailing_slash() {
        let client = ProxyAdminClient::new("http://127.0.0.1:2019/", None);
        assert_eq!(client.base_url, "http://127.0.0.1:2019");
        assert!(client.admin_token.is_none());
    }
}

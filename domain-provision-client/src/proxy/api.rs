//! `ProxyAdmin` trait implementation and request helpers.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::http::HttpUtils;
use crate::traits::ProxyAdmin;
use crate::types::{RemoveRouteOutcome, Route, RouteHealth};

use super::types::{extract_api_error, HealthPayload, RoutePayload};
use super::{ProxyAdminClient, PROXY_SERVICE};

impl ProxyAdminClient {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Map non-2xx statuses to typed errors.
    fn check_status(status: u16, body: &str, resource: &str) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        let message = extract_api_error(body);
        log::warn!("[{PROXY_SERVICE}] API error (HTTP {status}): {message}");

        Err(match status {
            401 | 403 => ClientError::InvalidCredentials {
                service: PROXY_SERVICE.to_string(),
                raw_message: Some(message),
            },
            404 => ClientError::NotFound {
                service: PROXY_SERVICE.to_string(),
                resource: resource.to_string(),
            },
            400 | 422 => ClientError::InvalidParameter {
                service: PROXY_SERVICE.to_string(),
                param: "host".to_string(),
                detail: message,
            },
            _ => ClientError::ApiError {
                service: PROXY_SERVICE.to_string(),
                status,
                message,
            },
        })
    }
}

#[async_trait]
impl ProxyAdmin for ProxyAdminClient {
    async fn add_route(&self, domain: &str) -> Result<Route> {
        #[derive(Serialize)]
        struct AddRouteBody<'a> {
            host: &'a str,
        }

        let url = format!("{}/routes", self.base_url);
        let request = self
            .authorize(self.client.post(&url))
            .json(&AddRouteBody { host: domain });

        let (status, body) =
            HttpUtils::execute_request(request, PROXY_SERVICE, "POST", &url).await?;
        Self::check_status(status, &body, domain)?;

        let payload: RoutePayload = HttpUtils::parse_json(&body, PROXY_SERVICE)?;
        Ok(Route {
            id: payload.id,
            host: payload.host,
        })
    }

    async fn remove_route(&self, route_id: &str) -> Result<RemoveRouteOutcome> {
        let url = format!(
            "{}/routes/{}",
            self.base_url,
            urlencoding::encode(route_id)
        );
        let request = self.authorize(self.client.delete(&url));

        let (status, body) =
            HttpUtils::execute_request(request, PROXY_SERVICE, "DELETE", &url).await?;
        if status == 404 {
            log::debug!("[{PROXY_SERVICE}] Route {route_id} already absent");
            return Ok(RemoveRouteOutcome::AlreadyAbsent);
        }
        Self::check_status(status, &body, route_id)?;
        Ok(RemoveRouteOutcome::Removed)
    }

    async fn route_health(&self, route_id: &str) -> Result<RouteHealth> {
        let url = format!(
            "{}/routes/{}/health",
            self.base_url,
            urlencoding::encode(route_id)
        );
        let request = self.authorize(self.client.get(&url));

        let (status, body) =
            HttpUtils::execute_request(request, PROXY_SERVICE, "GET", &url).await?;
        Self::check_status(status, &body, route_id)?;

        let payload: HealthPayload = HttpUtils::parse_json(&body, PROXY_SERVICE)?;
        Ok(RouteHealth {
            healthy: payload.healthy,
            detail: payload.detail,
        })
    }
}

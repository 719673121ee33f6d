//! Zone provider HTTP request methods.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::http::HttpUtils;

use super::types::extract_api_error;
use super::{HostedZoneClient, ZONE_SERVICE};

impl HostedZoneClient {
    /// Execute a GET request and parse the JSON body.
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_token));

        let (status, body) =
            HttpUtils::execute_request(request, ZONE_SERVICE, "GET", &url).await?;
        Self::check_status(status, &body, resource)?;
        HttpUtils::parse_json(&body, ZONE_SERVICE)
    }

    /// Execute a POST request with a JSON body and parse the response.
    pub(crate) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        resource: &str,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(body);

        let (status, body) =
            HttpUtils::execute_request(request, ZONE_SERVICE, "POST", &url).await?;
        Self::check_status(status, &body, resource)?;
        HttpUtils::parse_json(&body, ZONE_SERVICE)
    }

    /// Execute a DELETE request, returning the raw status code.
    ///
    /// The caller decides what a 404 means; for zone deletion it is a
    /// successful converge, not an error.
    pub(crate) async fn delete(&self, path: &str, resource: &str) -> Result<u16> {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {}", self.api_token));

        let (status, body) =
            HttpUtils::execute_request(request, ZONE_SERVICE, "DELETE", &url).await?;
        if status == 404 || (200..300).contains(&status) {
            return Ok(status);
        }
        Self::check_status(status, &body, resource)?;
        Ok(status)
    }

    /// Map non-2xx statuses to typed errors.
    fn check_status(status: u16, body: &str, resource: &str) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        let (code, message) = extract_api_error(body);
        log::warn!("[{ZONE_SERVICE}] API error (HTTP {status}): {message}");

        Err(match status {
            401 | 403 => ClientError::InvalidCredentials {
                service: ZONE_SERVICE.to_string(),
                raw_message: Some(message),
            },
            404 => ClientError::NotFound {
                service: ZONE_SERVICE.to_string(),
                resource: resource.to_string(),
            },
            400 | 422 => ClientError::InvalidParameter {
                service: ZONE_SERVICE.to_string(),
                param: code.unwrap_or_else(|| "request".to_string()),
                detail: message,
            },
            _ => ClientError::ApiError {
                service: ZONE_SERVICE.to_string(),
                status,
                message,
            },
        })
    }
}

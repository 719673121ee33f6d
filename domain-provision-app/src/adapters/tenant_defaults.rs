//! Tenant-defaults application via the platform's internal API.

use async_trait::async_trait;
use domain_provision_client::http::{create_http_client, normalize_base_url, HttpUtils};
use domain_provision_client::ClientError;
use domain_provision_core::error::CoreResult;
use domain_provision_core::traits::TenantDefaults;
use reqwest::Client;

const PLATFORM_SERVICE: &str = "platform";

/// Applies starter theme/pages/settings to a tenant by calling the platform's
/// internal endpoint. Idempotent on the platform side.
pub struct PlatformTenantDefaults {
    client: Client,
    base_url: String,
    internal_token: String,
}

impl PlatformTenantDefaults {
    #[must_use]
    pub fn new(base_url: impl Into<String>, internal_token: impl Into<String>) -> Self {
        Self {
            client: create_http_client(),
            base_url: normalize_base_url(base_url.into()),
            internal_token: internal_token.into(),
        }
    }
}

#[async_trait]
impl TenantDefaults for PlatformTenantDefaults {
    async fn apply_defaults(&self, tenant_id: &str) -> CoreResult<()> {
        let url = format!(
            "{}/internal/tenants/{}/defaults",
            self.base_url,
            urlencoding::encode(tenant_id)
        );
        let request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.internal_token));

        let (status, body) =
            HttpUtils::execute_request(request, PLATFORM_SERVICE, "POST", &url).await?;

        if (200..300).contains(&status) {
            log::info!("[{PLATFORM_SERVICE}] Applied defaults to tenant {tenant_id}");
            return Ok(());
        }

        Err(match status {
            401 | 403 => ClientError::InvalidCredentials {
                service: PLATFORM_SERVICE.to_string(),
                raw_message: Some(body),
            },
            404 => ClientError::NotFound {
                service: PLATFORM_SERVICE.to_string(),
                resource: tenant_id.to_string(),
            },
            _ => ClientError::ApiError {
                service: PLATFORM_SERVICE.to_string(),
                status,
                message: body,
            },
        }
        .into())
    }
}

//! Outbound email delivery via an HTTP mail API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::http::{create_http_client, normalize_base_url, HttpUtils};
use crate::traits::NotificationSink;

/// Service name used in logs and error variants.
const MAILER_SERVICE: &str = "mailer";

/// Thin client for a transactional mail API (`POST /messages`).
pub struct MailerClient {
    client: Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl MailerClient {
    /// Create a mailer client. `from` is the sender address stamped on every
    /// message.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client: create_http_client(),
            base_url: normalize_base_url(base_url.into()),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for MailerClient {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct MessageBody<'a> {
            from: &'a str,
            to: &'a str,
            subject: &'a str,
            html: &'a str,
            text: &'a str,
        }

        let url = format!("{}/messages", self.base_url);
        let request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&MessageBody {
                from: &self.from,
                to,
                subject,
                html: html_body,
                text: text_body,
            });

        let (status, body) =
            HttpUtils::execute_request(request, MAILER_SERVICE, "POST", &url).await?;

        if (200..300).contains(&status) {
            log::info!("[{MAILER_SERVICE}] Sent '{subject}' to {to}");
            return Ok(());
        }

        Err(match status {
            401 | 403 => ClientError::InvalidCredentials {
                service: MAILER_SERVICE.to_string(),
                raw_message: Some(body),
            },
            _ => ClientError::ApiError {
                service: MAILER_SERVICE.to_string(),
                status,
                message: body,
            },
        })
    }
}

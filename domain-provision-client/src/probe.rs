//! External HTTPS reachability probe.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::timeout;

use crate::traits::ReachabilityProbe;
use crate::types::ProbeOutcome;

/// Default per-probe timeout in seconds. Keep this under the job run budget.
const PROBE_TIMEOUT_SECS: u64 = 10;

/// HTTPS reachability probe against a candidate domain.
///
/// TLS verification is disabled: during the provisioning window the proxy may
/// be serving a newly-issued or self-signed certificate, and the probe only
/// asks "is the proxy terminating TLS and routing traffic", not "is the
/// certificate trusted".
pub struct HttpsProbe {
    client: Client,
    probe_timeout: Duration,
}

impl HttpsProbe {
    /// Create a probe with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
    }

    /// Create a probe with an explicit timeout (capped at 10s).
    #[must_use]
    pub fn with_timeout(probe_timeout: Duration) -> Self {
        let probe_timeout = probe_timeout.min(Duration::from_secs(PROBE_TIMEOUT_SECS));
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .connect_timeout(probe_timeout)
            .timeout(probe_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            probe_timeout,
        }
    }
}

impl Default for HttpsProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReachabilityProbe for HttpsProbe {
    async fn probe(&self, domain: &str) -> ProbeOutcome {
        let url = format!("https://{domain}/");
        log::debug!("[probe] HEAD {url}");

        // The reqwest timeout covers the request; the outer timeout guards
        // against redirect chains stretching past the budget.
        let result = timeout(
            self.probe_timeout.saturating_mul(2),
            self.client.head(&url).send(),
        )
        .await;

        let outcome = match result {
            Ok(Ok(response)) => ProbeOutcome::from_status(response.status().as_u16()),
            Ok(Err(e)) => ProbeOutcome::Unreachable {
                detail: e.to_string(),
            },
            Err(_) => ProbeOutcome::Unreachable {
                detail: format!("probe timed out ({}s)", self.probe_timeout.as_secs() * 2),
            },
        };

        log::debug!("[probe] {domain}: {outcome:?}");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_capped_at_ten_seconds() {
        let probe = HttpsProbe::with_timeout(Duration::from_secs(60));
        assert_eq!(probe.probe_timeout, Duration::from_secs(10));
    }

    #[test]
    fn explicit_short_timeout_kept() {
        let probe = HttpsProbe::with_timeout(Duration::from_secs(3));
        assert_eq!(probe.probe_timeout, Duration::from_secs(3));
    }
}

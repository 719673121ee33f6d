//! The persisted tenant-domain record and its invariant helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum stored length of `last_error`; longer diagnostics are truncated.
pub const LAST_ERROR_MAX_LEN: usize = 500;

/// Provisioning status of a tenant's custom domain.
///
/// `Active` is the terminal-success state. `Error` is terminal-until-retried:
/// a later reconciliation run may transition out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// Created, route may exist, availability not yet confirmed.
    Pending,
    /// Zone exists; waiting for the customer's registrar NS records to point
    /// at the provider.
    WaitingNsChange,
    /// Route created; waiting for TLS/proxy readiness.
    Configuring,
    /// Serving.
    Active,
    /// Last attempt failed; retried by a later run.
    Error,
}

impl DomainStatus {
    /// Stable string form used in persistence and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::WaitingNsChange => "waiting_ns_change",
            Self::Configuring => "configuring",
            Self::Active => "active",
            Self::Error => "error",
        }
    }

    /// Parse the stable string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "waiting_ns_change" => Some(Self::WaitingNsChange),
            "configuring" => Some(Self::Configuring),
            "active" => Some(Self::Active),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the tenant's DNS is delegated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegationMode {
    /// The domain delegates to the platform's DNS provider.
    Platform,
    /// The tenant runs its own nameservers; the provider-side zone is subject
    /// to grace-period cleanup.
    External,
}

impl DelegationMode {
    /// Stable string form used in persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::External => "external",
        }
    }

    /// Parse the stable string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "platform" => Some(Self::Platform),
            "external" => Some(Self::External),
            _ => None,
        }
    }
}

/// One tenant-domain pair. Owned exclusively by the orchestrator once created;
/// the admin workflow only creates it and the admin status view only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Owning tenant (foreign relation, not owned here).
    pub tenant_id: String,
    /// Fully-qualified domain name, unique across active records.
    pub domain: String,
    /// Provisioning status; transitions are governed by the orchestrator only.
    pub status: DomainStatus,
    /// DNS delegation mode; gates grace-period zone cleanup.
    pub delegation_mode: DelegationMode,
    /// Provider-side zone identifier, present once a zone exists.
    pub zone_id: Option<String>,
    /// Proxy-side route identifier, present once a route is configured.
    pub route_id: Option<String>,
    /// When set and elapsed, the zone is eligible for cleanup. Only ever set
    /// for `External` delegation.
    pub grace_period_until: Option<DateTime<Utc>>,
    /// Diagnostic from the most recent failed attempt; cleared on success.
    pub last_error: Option<String>,
    /// Address that receives the provisioning-success notification.
    pub notify_email: Option<String>,
    /// Set when availability was first confirmed.
    pub configured_at: Option<DateTime<Utc>>,
    /// Bumped on every orchestrator mutation.
    pub updated_at: DateTime<Utc>,
}

impl DomainRecord {
    /// A fresh record as the tenant-creation workflow produces it.
    #[must_use]
    pub fn new(
        tenant_id: impl Into<String>,
        domain: impl Into<String>,
        status: DomainStatus,
        delegation_mode: DelegationMode,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            domain: domain.into(),
            status,
            delegation_mode,
            zone_id: None,
            route_id: None,
            grace_period_until: None,
            last_error: None,
            notify_email: None,
            configured_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Record a failure diagnostic, truncated to [`LAST_ERROR_MAX_LEN`].
    /// Does not change `status`; the caller decides whether the failure is a
    /// state transition.
    pub fn set_error(&mut self, detail: &str, now: DateTime<Utc>) {
        let mut detail = detail.to_string();
        if detail.len() > LAST_ERROR_MAX_LEN {
            let mut end = LAST_ERROR_MAX_LEN;
            while !detail.is_char_boundary(end) {
                end -= 1;
            }
            detail.truncate(end);
        }
        self.last_error = Some(detail);
        self.updated_at = now;
    }

    /// Whether the route was never successfully created. Such records are the
    /// only `Error`-state candidates for automatic retry.
    #[must_use]
    pub fn route_missing(&self) -> bool {
        self.route_id.is_none()
    }

    /// Whether the provider-side zone is eligible for grace-period cleanup.
    #[must_use]
    pub fn zone_expired(&self, now: DateTime<Utc>) -> bool {
        self.delegation_mode == DelegationMode::External
            && self.zone_id.is_some()
            && self.grace_period_until.is_some_and(|t| t <= now)
    }
}

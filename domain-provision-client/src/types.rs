//! Shared result types returned by the external-service clients.

use serde::{Deserialize, Serialize};

/// A DNS zone hosted by the external zone provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-side zone identifier.
    pub id: String,
    /// Apex domain the zone covers.
    pub domain: String,
    /// Nameservers the customer must delegate to.
    pub nameservers: Vec<String>,
}

/// Result of a delegation query against a hosted zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationStatus {
    /// Whether the registrar-level NS records point at the provider.
    pub delegated: bool,
    /// Nameservers observed on the public internet, if the provider reports them.
    #[serde(default)]
    pub observed_nameservers: Vec<String>,
}

/// Outcome of a zone deletion. A provider-side "not found" converges to the
/// same end state as a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteZoneOutcome {
    /// The provider deleted the zone.
    Deleted,
    /// The zone was already gone (deleted out of band or by a prior run).
    AlreadyAbsent,
}

/// A reverse-proxy route mapping an incoming hostname to the platform backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Proxy-side route identifier.
    pub id: String,
    /// Hostname the route matches.
    pub host: String,
}

/// Outcome of a route removal, mirroring [`DeleteZoneOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoveRouteOutcome {
    /// The proxy removed the route.
    Removed,
    /// The route was already gone.
    AlreadyAbsent,
}

/// Health of a configured proxy route as reported by the control API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHealth {
    /// Whether the proxy considers the route serving.
    pub healthy: bool,
    /// Optional diagnostic from the proxy (certificate state, upstream errors).
    #[serde(default)]
    pub detail: Option<String>,
}

/// Result of an external HTTPS reachability probe against a candidate domain.
///
/// Any HTTP status below 500 counts as ready: the proxy is terminating TLS and
/// routing traffic, regardless of what the tenant application answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// The domain answered over HTTPS with a status in `[200, 500)`.
    Ready { status: u16 },
    /// The domain answered with a 5xx status; the proxy or upstream is not
    /// serving yet. Not a failure, just "check again next cycle".
    NotReady { status: u16 },
    /// No HTTP response at all (DNS, TCP, or TLS failure).
    Unreachable { detail: String },
}

impl ProbeOutcome {
    /// Classify a final HTTP status: `[200, 500)` is ready, anything else
    /// means "check again next cycle".
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        if (200..500).contains(&status) {
            Self::Ready { status }
        } else {
            Self::NotReady { status }
        }
    }

    /// True when the proxy layer is confirmed to be serving the domain.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

//! Seam traits implemented by the concrete HTTP clients.
//!
//! The orchestrator core consumes these as `Arc<dyn …>` so reconciliation
//! logic can be exercised against in-memory mocks. Implementations are thin,
//! stateless wrappers: one operation maps 1:1 to one external HTTP call, and
//! no retry/backoff lives here; retry policy is the reconciliation cadence.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    DelegationStatus, DeleteZoneOutcome, ProbeOutcome, RemoveRouteOutcome, Route, RouteHealth, Zone,
};

/// DNS/zone provider contract.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// Create a hosted zone for `domain`.
    async fn create_zone(&self, domain: &str) -> Result<Zone>;

    /// Delete the zone. A provider "not found" is reported as
    /// [`DeleteZoneOutcome::AlreadyAbsent`], never as an error.
    async fn delete_zone(&self, zone_id: &str) -> Result<DeleteZoneOutcome>;

    /// Query whether the zone's domain is delegated to the provider's
    /// nameservers.
    async fn check_delegation(&self, zone_id: &str) -> Result<DelegationStatus>;
}

/// Reverse-proxy control API contract.
#[async_trait]
pub trait ProxyAdmin: Send + Sync {
    /// Add a host route for `domain`, returning the configured route.
    async fn add_route(&self, domain: &str) -> Result<Route>;

    /// Remove a route. A proxy "not found" is reported as
    /// [`RemoveRouteOutcome::AlreadyAbsent`], never as an error.
    async fn remove_route(&self, route_id: &str) -> Result<RemoveRouteOutcome>;

    /// Query the health of a configured route.
    async fn route_health(&self, route_id: &str) -> Result<RouteHealth>;
}

/// Lightweight external reachability check against a candidate domain.
///
/// Infallible by design: transport failures are data
/// ([`ProbeOutcome::Unreachable`]), not errors, because an unreachable domain
/// is an expected state during the provisioning window.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn probe(&self, domain: &str) -> ProbeOutcome;
}

/// Outbound notification contract (email). Fire-and-log: callers must never
/// let a send failure block a state transition.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<()>;
}

//! Business-logic service layer.

mod orchestrator;

pub use orchestrator::ProvisioningOrchestrator;

use std::sync::Arc;

use crate::traits::{
    DomainRecordRepository, NotificationSink, ProxyAdmin, ReachabilityProbe, TenantDefaults,
    ZoneProvider,
};

/// Holds every dependency the orchestrator needs.
///
/// The platform layer constructs this with its concrete adapters; nothing in
/// the core reaches for global state.
pub struct ServiceContext {
    /// Domain-record persistence.
    pub records: Arc<dyn DomainRecordRepository>,
    /// DNS/zone provider client.
    pub zones: Arc<dyn ZoneProvider>,
    /// Reverse-proxy control client.
    pub proxy: Arc<dyn ProxyAdmin>,
    /// External HTTPS reachability probe.
    pub probe: Arc<dyn ReachabilityProbe>,
    /// Outbound notification sink (email).
    pub notifier: Arc<dyn NotificationSink>,
    /// Tenant-defaults application.
    pub defaults: Arc<dyn TenantDefaults>,
}

impl ServiceContext {
    /// Create a service context.
    #[must_use]
    pub fn new(
        records: Arc<dyn DomainRecordRepository>,
        zones: Arc<dyn ZoneProvider>,
        proxy: Arc<dyn ProxyAdmin>,
        probe: Arc<dyn ReachabilityProbe>,
        notifier: Arc<dyn NotificationSink>,
        defaults: Arc<dyn TenantDefaults>,
    ) -> Self {
        Self {
            records,
            zones,
            proxy,
            probe,
            notifier,
            defaults,
        }
    }
}

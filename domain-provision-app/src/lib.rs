//! Application bootstrap for the domain-provisioning orchestrator.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection), and the sqlite persistence adapter. The cron binary builds an
//! `AppState` from the TOML config and runs exactly one job per invocation.

use std::sync::Arc;

use domain_provision_client::{HostedZoneClient, HttpsProbe, MailerClient, ProxyAdminClient};
use domain_provision_core::error::{CoreError, CoreResult};
use domain_provision_core::jobs::{AvailabilityWatcher, JobConfig, NameserverWatcher, ZoneCleanup};
use domain_provision_core::services::{ProvisioningOrchestrator, ServiceContext};
use domain_provision_core::traits::{
    DomainRecordRepository, NotificationSink, ProxyAdmin, ReachabilityProbe, TenantDefaults,
    ZoneProvider,
};

pub mod adapters;
pub mod config;

use adapters::{PlatformTenantDefaults, SqliteStore};
use config::AppConfig;

/// Fully wired application state: context, orchestrator, and the three jobs.
pub struct AppState {
    pub ctx: Arc<ServiceContext>,
    pub orchestrator: Arc<ProvisioningOrchestrator>,
    pub nameserver_watcher: NameserverWatcher,
    pub availability_watcher: AvailabilityWatcher,
    pub zone_cleanup: ZoneCleanup,
}

impl AppState {
    /// Build the state from a loaded config: sqlite store plus the concrete
    /// HTTP clients.
    pub async fn from_config(config: &AppConfig) -> CoreResult<Self> {
        let store = Arc::new(SqliteStore::new(&config.database.path).await?);
        AppStateBuilder::new()
            .records(store)
            .zones(Arc::new(HostedZoneClient::new(
                config.zone_api.endpoint.clone(),
                config.zone_api.api_token.clone(),
            )))
            .proxy(Arc::new(ProxyAdminClient::new(
                config.proxy_admin.endpoint.clone(),
                config.proxy_admin.admin_token.clone(),
            )))
            .probe(Arc::new(HttpsProbe::with_timeout(config.probe.timeout())))
            .notifier(Arc::new(MailerClient::new(
                config.mailer.endpoint.clone(),
                config.mailer.api_key.clone(),
                config.mailer.from.clone(),
            )))
            .defaults(Arc::new(PlatformTenantDefaults::new(
                config.platform.endpoint.clone(),
                config.platform.internal_token.clone(),
            )))
            .job_config(config.jobs.job_config())
            .build()
    }
}

/// Builder for constructing `AppState` with explicit adapters.
///
/// # Required adapters
/// - `records`: domain-record persistence
/// - `zones`: DNS/zone provider client
/// - `proxy`: reverse-proxy control client
/// - `probe`: HTTPS reachability probe
/// - `notifier`: outbound notification sink
/// - `defaults`: tenant-defaults application
///
/// # Optional
/// - `job_config`: defaults to [`JobConfig::default`]
pub struct AppStateBuilder {
    records: Option<Arc<dyn DomainRecordRepository>>,
    zones: Option<Arc<dyn ZoneProvider>>,
    proxy: Option<Arc<dyn ProxyAdmin>>,
    probe: Option<Arc<dyn ReachabilityProbe>>,
    notifier: Option<Arc<dyn NotificationSink>>,
    defaults: Option<Arc<dyn TenantDefaults>>,
    job_config: Option<JobConfig>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: None,
            zones: None,
            proxy: None,
            probe: None,
            notifier: None,
            defaults: None,
            job_config: None,
        }
    }

    #[must_use]
    pub fn records(mut self, records: Arc<dyn DomainRecordRepository>) -> Self {
        self.records = Some(records);
        self
    }

    #[must_use]
    pub fn zones(mut self, zones: Arc<dyn ZoneProvider>) -> Self {
        self.zones = Some(zones);
        self
    }

    #[must_use]
    pub fn proxy(mut self, proxy: Arc<dyn ProxyAdmin>) -> Self {
        self.proxy = Some(proxy);
        self
    }

    #[must_use]
    pub fn probe(mut self, probe: Arc<dyn ReachabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn defaults(mut self, defaults: Arc<dyn TenantDefaults>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    #[must_use]
    pub fn job_config(mut self, job_config: JobConfig) -> Self {
        self.job_config = Some(job_config);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if a required adapter is missing.
    pub fn build(self) -> CoreResult<AppState> {
        let records = self
            .records
            .ok_or_else(|| CoreError::ValidationError("records is required".to_string()))?;
        let zones = self
            .zones
            .ok_or_else(|| CoreError::ValidationError("zones is required".to_string()))?;
        let proxy = self
            .proxy
            .ok_or_else(|| CoreError::ValidationError("proxy is required".to_string()))?;
        let probe = self
            .probe
            .ok_or_else(|| CoreError::ValidationError("probe is required".to_string()))?;
        let notifier = self
            .notifier
            .ok_or_else(|| CoreError::ValidationError("notifier is required".to_string()))?;
        let defaults = self
            .defaults
            .ok_or_else(|| CoreError::ValidationError("defaults is required".to_string()))?;
        let job_config = self.job_config.unwrap_or_default();

        let ctx = Arc::new(ServiceContext::new(
            Arc::clone(&records),
            zones,
            proxy,
            probe,
            notifier,
            defaults,
        ));
        let orchestrator = Arc::new(ProvisioningOrchestrator::new(Arc::clone(&ctx)));

        let nameserver_watcher = NameserverWatcher::new(
            Arc::clone(&records),
            Arc::clone(&orchestrator),
            job_config.clone(),
        );
        let availability_watcher = AvailabilityWatcher::new(
            Arc::clone(&records),
            Arc::clone(&orchestrator),
            job_config.clone(),
        );
        let zone_cleanup =
            ZoneCleanup::new(Arc::clone(&records), Arc::clone(&orchestrator), job_config);

        Ok(AppState {
            ctx,
            orchestrator,
            nameserver_watcher,
            availability_watcher,
            zone_cleanup,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

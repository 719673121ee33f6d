//! In-memory mocks for unit-testing the orchestrator and jobs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_provision_client::{
    ClientError, DelegationStatus, DeleteZoneOutcome, NotificationSink, ProbeOutcome, ProxyAdmin,
    ReachabilityProbe, RemoveRouteOutcome, Route, RouteHealth, Zone, ZoneProvider,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ProvisioningOrchestrator, ServiceContext};
use crate::traits::{DomainRecordRepository, TenantDefaults};
use crate::types::{DomainRecord, DomainStatus};

/// In-memory record store. The claim set uses a synchronous mutex so that
/// `try_claim` is atomic with respect to concurrent callers.
#[derive(Default)]
pub struct MockDomainRecordRepository {
    records: RwLock<HashMap<String, DomainRecord>>,
    claims: Mutex<HashSet<String>>,
}

impl MockDomainRecordRepository {
    pub async fn insert(&self, record: DomainRecord) {
        self.records
            .write()
            .await
            .insert(record.domain.clone(), record);
    }

    pub async fn get(&self, domain: &str) -> Option<DomainRecord> {
        self.records.read().await.get(domain).cloned()
    }
}

#[async_trait]
impl DomainRecordRepository for MockDomainRecordRepository {
    async fn find_by_domain(&self, domain: &str) -> CoreResult<Option<DomainRecord>> {
        Ok(self.records.read().await.get(domain).cloned())
    }

    async fn find_by_tenant(&self, tenant_id: &str) -> CoreResult<Vec<DomainRecord>> {
        let mut out: Vec<_> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(out)
    }

    async fn find_by_status(&self, status: DomainStatus) -> CoreResult<Vec<DomainRecord>> {
        let mut out: Vec<_> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(out)
    }

    async fn find_route_retry_candidates(&self, limit: usize) -> CoreResult<Vec<DomainRecord>> {
        let mut out: Vec<_> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.status == DomainStatus::Error && r.route_id.is_none())
            .cloned()
            .collect();
        out.sort_by(|a, b| a.domain.cmp(&b.domain));
        out.truncate(limit);
        Ok(out)
    }

    async fn find_expired_zones(&self, now: DateTime<Utc>) -> CoreResult<Vec<DomainRecord>> {
        let mut out: Vec<_> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.zone_expired(now))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(out)
    }

    async fn save(&self, record: &DomainRecord) -> CoreResult<()> {
        self.records
            .write()
            .await
            .insert(record.domain.clone(), record.clone());
        Ok(())
    }

    async fn try_claim(&self, domain: &str) -> CoreResult<bool> {
        Ok(self.claims.lock().unwrap().insert(domain.to_string()))
    }

    async fn release(&self, domain: &str) -> CoreResult<()> {
        self.claims.lock().unwrap().remove(domain);
        Ok(())
    }
}

/// Zone-provider mock with per-zone delegation answers and failure injection.
#[derive(Default)]
pub struct MockZoneProvider {
    zones: Mutex<HashMap<String, String>>,
    delegated: Mutex<HashMap<String, bool>>,
    delegation_failures: Mutex<HashMap<String, ClientError>>,
    delete_failures: Mutex<HashMap<String, String>>,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    delegation_calls: AtomicUsize,
}

impl MockZoneProvider {
    pub fn add_zone(&self, zone_id: &str, domain: &str) {
        self.zones
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), domain.to_string());
    }

    pub fn set_delegated(&self, zone_id: &str, delegated: bool) {
        self.delegated
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), delegated);
    }

    pub fn fail_delegation_check(&self, zone_id: &str, error: ClientError) {
        self.delegation_failures
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), error);
    }

    pub fn fail_delete(&self, zone_id: &str, message: &str) {
        self.delete_failures
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), message.to_string());
    }

    pub fn delete_zone_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn check_delegation_calls(&self) -> usize {
        self.delegation_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneProvider for MockZoneProvider {
    async fn create_zone(&self, domain: &str) -> Result<Zone, ClientError> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let zone_id = format!("zone-{n}");
        self.add_zone(&zone_id, domain);
        Ok(Zone {
            id: zone_id,
            domain: domain.to_string(),
            nameservers: vec!["ns1.provider.test".to_string(), "ns2.provider.test".to_string()],
        })
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<DeleteZoneOutcome, ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.delete_failures.lock().unwrap().get(zone_id) {
            return Err(ClientError::ApiError {
                service: "zone".to_string(),
                status: 503,
                message: message.clone(),
            });
        }
        if self.zones.lock().unwrap().remove(zone_id).is_some() {
            Ok(DeleteZoneOutcome::Deleted)
        } else {
            Ok(DeleteZoneOutcome::AlreadyAbsent)
        }
    }

    async fn check_delegation(&self, zone_id: &str) -> Result<DelegationStatus, ClientError> {
        self.delegation_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.delegation_failures.lock().unwrap().get(zone_id) {
            return Err(error.clone());
        }
        let delegated = self
            .delegated
            .lock()
            .unwrap()
            .get(zone_id)
            .copied()
            .unwrap_or(false);
        Ok(DelegationStatus {
            delegated,
            observed_nameservers: Vec::new(),
        })
    }
}

/// Proxy-control mock issuing sequential route ids.
#[derive(Default)]
pub struct MockProxyAdmin {
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
    add_failure: Mutex<Option<String>>,
    routes: Mutex<HashMap<String, String>>,
}

impl MockProxyAdmin {
    pub fn fail_add_route(&self, message: &str) {
        *self.add_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn add_route_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProxyAdmin for MockProxyAdmin {
    async fn add_route(&self, domain: &str) -> Result<Route, ClientError> {
        let n = self.add_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(message) = self.add_failure.lock().unwrap().clone() {
            return Err(ClientError::ApiError {
                service: "proxy".to_string(),
                status: 502,
                message,
            });
        }
        let route_id = format!("rt-{n}");
        self.routes
            .lock()
            .unwrap()
            .insert(route_id.clone(), domain.to_string());
        Ok(Route {
            id: route_id,
            host: domain.to_string(),
        })
    }

    async fn remove_route(&self, route_id: &str) -> Result<RemoveRouteOutcome, ClientError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if self.routes.lock().unwrap().remove(route_id).is_some() {
            Ok(RemoveRouteOutcome::Removed)
        } else {
            Ok(RemoveRouteOutcome::AlreadyAbsent)
        }
    }

    async fn route_health(&self, route_id: &str) -> Result<RouteHealth, ClientError> {
        let healthy = self.routes.lock().unwrap().contains_key(route_id);
        Ok(RouteHealth {
            healthy,
            detail: None,
        })
    }
}

/// Probe mock with a settable outcome and an optional per-call delay for
/// run-budget tests.
pub struct MockProbe {
    outcome: Mutex<ProbeOutcome>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl Default for MockProbe {
    fn default() -> Self {
        Self {
            outcome: Mutex::new(ProbeOutcome::Ready { status: 200 }),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

impl MockProbe {
    pub fn set_outcome(&self, outcome: ProbeOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn probe_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReachabilityProbe for MockProbe {
    async fn probe(&self, _domain: &str) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail_next: AtomicBool,
}

impl MockNotifier {
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSink for MockNotifier {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        _html_body: &str,
        _text_body: &str,
    ) -> Result<(), ClientError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ClientError::ApiError {
                service: "mailer".to_string(),
                status: 500,
                message: "smtp relay down".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTenantDefaults {
    applied: Mutex<Vec<String>>,
    fail_next: AtomicBool,
}

impl MockTenantDefaults {
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl TenantDefaults for MockTenantDefaults {
    async fn apply_defaults(&self, tenant_id: &str) -> CoreResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CoreError::StorageError(
                "default pages insert failed".to_string(),
            ));
        }
        self.applied.lock().unwrap().push(tenant_id.to_string());
        Ok(())
    }
}

/// Mocks plus a fully wired orchestrator.
pub struct TestHarness {
    pub repo: Arc<MockDomainRecordRepository>,
    pub zones: Arc<MockZoneProvider>,
    pub proxy: Arc<MockProxyAdmin>,
    pub probe: Arc<MockProbe>,
    pub notifier: Arc<MockNotifier>,
    pub defaults: Arc<MockTenantDefaults>,
    pub orchestrator: Arc<ProvisioningOrchestrator>,
}

impl TestHarness {
    pub fn new() -> Self {
        let repo = Arc::new(MockDomainRecordRepository::default());
        let zones = Arc::new(MockZoneProvider::default());
        let proxy = Arc::new(MockProxyAdmin::default());
        let probe = Arc::new(MockProbe::default());
        let notifier = Arc::new(MockNotifier::default());
        let defaults = Arc::new(MockTenantDefaults::default());
        let ctx = Arc::new(ServiceContext::new(
            repo.clone(),
            zones.clone(),
            proxy.clone(),
            probe.clone(),
            notifier.clone(),
            defaults.clone(),
        ));
        let orchestrator = Arc::new(ProvisioningOrchestrator::new(ctx));
        Self {
            repo,
            zones,
            proxy,
            probe,
            notifier,
            defaults,
            orchestrator,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

//! Persistence abstraction for domain records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreResult;
use crate::types::{DomainRecord, DomainStatus};

/// Domain-record repository trait.
///
/// Platform implementations:
/// - App: `SqliteStore` (`SeaORM`)
/// - Tests: `MockDomainRecordRepository`
///
/// # Claiming
///
/// Reconciliation jobs run on independent schedules and a scheduler may
/// overlap runs, so the orchestrator claims a domain before mutating it and
/// releases it afterwards. `try_claim` must be atomic: of two concurrent
/// claimants for one domain, exactly one observes `true`.
#[async_trait]
pub trait DomainRecordRepository: Send + Sync {
    /// Look up a record by its domain (the unique key).
    async fn find_by_domain(&self, domain: &str) -> CoreResult<Option<DomainRecord>>;

    /// All records belonging to one tenant (admin status view).
    async fn find_by_tenant(&self, tenant_id: &str) -> CoreResult<Vec<DomainRecord>>;

    /// All records currently in `status`.
    async fn find_by_status(&self, status: DomainStatus) -> CoreResult<Vec<DomainRecord>>;

    /// `error`-state records whose route was never created, capped at `limit`.
    /// These are the only error records eligible for automatic retry.
    async fn find_route_retry_candidates(&self, limit: usize) -> CoreResult<Vec<DomainRecord>>;

    /// Records whose provider zone is eligible for grace-period cleanup:
    /// external delegation, non-null `zone_id`, `grace_period_until <= now`.
    async fn find_expired_zones(&self, now: DateTime<Utc>) -> CoreResult<Vec<DomainRecord>>;

    /// Persist the record (upsert by domain).
    async fn save(&self, record: &DomainRecord) -> CoreResult<()>;

    /// Atomically claim the domain for reconciliation. Returns `false` when
    /// another run holds the claim; the caller must then skip the record.
    async fn try_claim(&self, domain: &str) -> CoreResult<bool>;

    /// Release a claim taken with [`try_claim`](Self::try_claim). Must be
    /// called on every exit path, including failures.
    async fn release(&self, domain: &str) -> CoreResult<()>;
}

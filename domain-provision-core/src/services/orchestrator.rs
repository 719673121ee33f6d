//! Provisioning orchestrator
//!
//! The only component with state-transition logic. Each public operation is
//! idempotent, claim-guarded, and safe to call repeatedly on the same record:
//! the persisted `status` is the sole precondition checked before each step,
//! so a stale or concurrent caller observes a skip instead of a double apply.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{DomainRecord, DomainStatus, ReconcileOutcome};

use super::ServiceContext;

pub struct ProvisioningOrchestrator {
    ctx: Arc<ServiceContext>,
}

impl ProvisioningOrchestrator {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// `waiting_ns_change -> configuring`: the customer's registrar now points
    /// at the provider, so create the proxy route.
    ///
    /// Side-effect ordering is deliberate: `route_id` is persisted immediately
    /// after `add_route` succeeds, before tenant defaults or the notification
    /// run, so a downstream failure never loses the created route.
    pub async fn reconcile_nameserver_change(&self, domain: &str) -> CoreResult<ReconcileOutcome> {
        let Some(_guard) = self.claim(domain).await? else {
            return self.skipped_outcome(domain).await;
        };
        let result = self.do_nameserver_change(domain).await;
        self.release(domain).await;
        result
    }

    async fn do_nameserver_change(&self, domain: &str) -> CoreResult<ReconcileOutcome> {
        // Re-fetch under the claim; the candidate list may be stale.
        let mut record = self.fetch(domain).await?;
        if record.status != DomainStatus::WaitingNsChange {
            return Ok(ReconcileOutcome::skipped(domain, record.status));
        }
        let Some(zone_id) = record.zone_id.clone() else {
            return Err(CoreError::ValidationError(format!(
                "{domain} is waiting_ns_change without a zone"
            )));
        };

        // 1. Ask the provider whether delegation has landed.
        let delegation = match self.ctx.zones.check_delegation(&zone_id).await {
            Ok(d) => d,
            Err(e) => return self.record_failure(record, &e.to_string()).await,
        };
        if !delegation.delegated {
            log::debug!(
                "[orchestrator] {domain}: still awaiting delegation (observed: {:?})",
                delegation.observed_nameservers
            );
            return Ok(ReconcileOutcome::unchanged(domain, record.status));
        }

        // 2. Delegation confirmed: create the route. On failure the zone is
        //    retained so the retry does not recreate it.
        let route = match self.ctx.proxy.add_route(domain).await {
            Ok(r) => r,
            Err(e) => return self.record_failure(record, &e.to_string()).await,
        };

        // 3. Persist route_id before any downstream step.
        let previous = record.status;
        record.route_id = Some(route.id);
        record.status = DomainStatus::Configuring;
        record.last_error = None;
        record.updated_at = Utc::now();
        self.ctx.records.save(&record).await?;

        // 4. Downstream steps are fire-and-log; they never revert the route.
        if let Err(e) = self.ctx.defaults.apply_defaults(&record.tenant_id).await {
            log::warn!(
                "[orchestrator] {domain}: tenant defaults failed for {}: {e}",
                record.tenant_id
            );
        }
        self.notify_route_created(&record).await;

        Ok(ReconcileOutcome::transitioned(domain, previous, record.status))
    }

    /// `pending`/`configuring -> active` (and the `error` retry path): probe
    /// the domain over HTTPS and activate once the proxy layer answers.
    ///
    /// An `error` record whose route was never created gets one more
    /// `add_route` attempt here; the caller bounds how many such records enter
    /// a single run. A not-ready or unreachable probe leaves the record
    /// untouched for the next cycle.
    pub async fn reconcile_availability(&self, domain: &str) -> CoreResult<ReconcileOutcome> {
        let Some(_guard) = self.claim(domain).await? else {
            return self.skipped_outcome(domain).await;
        };
        let result = self.do_availability(domain).await;
        self.release(domain).await;
        result
    }

    async fn do_availability(&self, domain: &str) -> CoreResult<ReconcileOutcome> {
        let mut record = self.fetch(domain).await?;
        let eligible = matches!(
            record.status,
            DomainStatus::Pending | DomainStatus::Configuring
        ) || (record.status == DomainStatus::Error && record.route_missing());
        if !eligible {
            return Ok(ReconcileOutcome::skipped(domain, record.status));
        }
        let previous = record.status;

        // 1. A route must exist before the record may go active. Covers both
        //    the error-retry path and pending records created without one.
        if record.route_missing() {
            let route = match self.ctx.proxy.add_route(domain).await {
                Ok(r) => r,
                Err(e) => return self.record_failure(record, &e.to_string()).await,
            };
            record.route_id = Some(route.id);
            record.status = DomainStatus::Configuring;
            record.updated_at = Utc::now();
            self.ctx.records.save(&record).await?;
        }

        // 2. Probe. Not-ready is data, not failure.
        let outcome = self.ctx.probe.probe(domain).await;
        if !outcome.is_ready() {
            log::debug!("[orchestrator] {domain}: probe not ready ({outcome:?})");
            if record.status == previous {
                return Ok(ReconcileOutcome::unchanged(domain, previous));
            }
            return Ok(ReconcileOutcome::transitioned(domain, previous, record.status));
        }

        // 3. Serving: activate.
        let now = Utc::now();
        record.status = DomainStatus::Active;
        record.configured_at = Some(now);
        record.last_error = None;
        record.updated_at = now;
        self.ctx.records.save(&record).await?;

        Ok(ReconcileOutcome::transitioned(domain, previous, DomainStatus::Active))
    }

    /// Grace-period zone cleanup for one record. A provider "not found"
    /// converges identically to a successful delete; a provider error records
    /// a diagnostic but never changes `status`.
    pub async fn cleanup_zone(
        &self,
        domain: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<ReconcileOutcome> {
        let Some(_guard) = self.claim(domain).await? else {
            return self.skipped_outcome(domain).await;
        };
        let result = self.do_cleanup_zone(domain, now).await;
        self.release(domain).await;
        result
    }

    async fn do_cleanup_zone(
        &self,
        domain: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<ReconcileOutcome> {
        let mut record = self.fetch(domain).await?;
        if !record.zone_expired(now) {
            return Ok(ReconcileOutcome::skipped(domain, record.status));
        }
        let Some(zone_id) = record.zone_id.clone() else {
            // zone_expired() requires a zone; unreachable but not worth a panic.
            return Ok(ReconcileOutcome::skipped(domain, record.status));
        };

        match self.ctx.zones.delete_zone(&zone_id).await {
            Ok(outcome) => {
                log::info!("[orchestrator] {domain}: zone {zone_id} cleaned up ({outcome:?})");
                record.zone_id = None;
                record.grace_period_until = None;
                record.updated_at = Utc::now();
                self.ctx.records.save(&record).await?;
                Ok(ReconcileOutcome::transitioned(domain, record.status, record.status))
            }
            Err(e) => {
                // Status is never touched by the sweep; retried next cycle.
                let detail = e.to_string();
                record.set_error(&detail, Utc::now());
                self.ctx.records.save(&record).await?;
                Ok(ReconcileOutcome::failed(domain, record.status, record.status, detail))
            }
        }
    }

    /// Full cleanup pass over every record whose grace period has elapsed.
    /// Per-record failures are folded into the outcome list; one broken record
    /// never aborts the sweep.
    pub async fn sweep_expired_zones(&self) -> CoreResult<Vec<ReconcileOutcome>> {
        let now = Utc::now();
        let candidates = self.ctx.records.find_expired_zones(now).await?;
        let mut outcomes = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.cleanup_zone(&candidate.domain, now).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => outcomes.push(ReconcileOutcome::failed(
                    &candidate.domain,
                    candidate.status,
                    candidate.status,
                    e.to_string(),
                )),
            }
        }
        Ok(outcomes)
    }

    /// Move the record to `error` after an external-call failure, keeping any
    /// identifiers already persisted so the next attempt resumes.
    async fn record_failure(
        &self,
        mut record: DomainRecord,
        detail: &str,
    ) -> CoreResult<ReconcileOutcome> {
        let previous = record.status;
        record.status = DomainStatus::Error;
        record.set_error(detail, Utc::now());
        self.ctx.records.save(&record).await?;
        Ok(ReconcileOutcome::failed(
            &record.domain,
            previous,
            DomainStatus::Error,
            detail,
        ))
    }

    async fn notify_route_created(&self, record: &DomainRecord) {
        let Some(to) = record.notify_email.as_deref() else {
            log::debug!(
                "[orchestrator] {}: no notification address on record",
                record.domain
            );
            return;
        };
        let subject = format!("Your domain {} is connected", record.domain);
        let html = format!(
            "<p>Your custom domain <strong>{}</strong> has been connected. \
             It will start serving as soon as its certificate is issued, \
             usually within a few minutes.</p>",
            record.domain
        );
        let text = format!(
            "Your custom domain {} has been connected. It will start serving \
             as soon as its certificate is issued, usually within a few minutes.",
            record.domain
        );
        if let Err(e) = self.ctx.notifier.send(to, &subject, &html, &text).await {
            log::warn!(
                "[orchestrator] {}: success notification to {to} failed: {e}",
                record.domain
            );
        }
    }

    async fn fetch(&self, domain: &str) -> CoreResult<DomainRecord> {
        self.ctx
            .records
            .find_by_domain(domain)
            .await?
            .ok_or_else(|| CoreError::RecordNotFound(domain.to_string()))
    }

    /// Returns `Some(())` when the claim was won, `None` when another run
    /// holds it.
    async fn claim(&self, domain: &str) -> CoreResult<Option<()>> {
        if self.ctx.records.try_claim(domain).await? {
            Ok(Some(()))
        } else {
            log::debug!("[orchestrator] {domain}: claimed by a concurrent run, skipping");
            Ok(None)
        }
    }

    async fn release(&self, domain: &str) {
        if let Err(e) = self.ctx.records.release(domain).await {
            log::error!("[orchestrator] {domain}: failed to release claim: {e}");
        }
    }

    async fn skipped_outcome(&self, domain: &str) -> CoreResult<ReconcileOutcome> {
        let record = self.fetch(domain).await?;
        Ok(ReconcileOutcome::skipped(domain, record.status))
    }
}

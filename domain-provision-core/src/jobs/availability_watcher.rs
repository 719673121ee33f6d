//! Proxy/SSL-readiness watcher.
//!
//! Runs every ~15 minutes: probes `pending` and `configuring` records over
//! HTTPS and activates the ones that answer. Also re-enters a bounded batch of
//! `error` records whose route was never created.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ProvisioningOrchestrator;
use crate::traits::DomainRecordRepository;
use crate::types::{DomainStatus, JobReport};

use super::{drive, JobConfig};

pub struct AvailabilityWatcher {
    records: Arc<dyn DomainRecordRepository>,
    orchestrator: Arc<ProvisioningOrchestrator>,
    config: JobConfig,
}

impl AvailabilityWatcher {
    #[must_use]
    pub fn new(
        records: Arc<dyn DomainRecordRepository>,
        orchestrator: Arc<ProvisioningOrchestrator>,
        config: JobConfig,
    ) -> Self {
        Self {
            records,
            orchestrator,
            config,
        }
    }

    pub async fn run(&self) -> CoreResult<JobReport> {
        let mut report = JobReport::new("availability-watcher");

        let mut candidates = self.records.find_by_status(DomainStatus::Pending).await?;
        candidates.extend(self.records.find_by_status(DomainStatus::Configuring).await?);
        let retries = self
            .records
            .find_route_retry_candidates(self.config.error_retry_batch)
            .await?;
        if !retries.is_empty() {
            log::info!(
                "[availability-watcher] re-entering {} failed records",
                retries.len()
            );
        }
        candidates.extend(retries);
        log::info!(
            "[availability-watcher] {} candidate records",
            candidates.len()
        );

        let orchestrator = &self.orchestrator;
        drive(&mut report, self.config.run_budget, candidates, |domain| async move {
            orchestrator.reconcile_availability(&domain).await
        })
        .await;

        report.log_summary();
        Ok(report)
    }
}

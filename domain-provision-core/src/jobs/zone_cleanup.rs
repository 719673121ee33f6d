//! Expired-zone cleanup sweep.
//!
//! Runs every ~60 minutes: deletes the provider-side zone of every record
//! whose grace period has elapsed (tenants that opted out of provider DNS)
//! and clears the zone fields. Status is never touched.

use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreResult;
use crate::services::ProvisioningOrchestrator;
use crate::traits::DomainRecordRepository;
use crate::types::JobReport;

use super::{drive, JobConfig};

pub struct ZoneCleanup {
    records: Arc<dyn DomainRecordRepository>,
    orchestrator: Arc<ProvisioningOrchestrator>,
    config: JobConfig,
}

impl ZoneCleanup {
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
        let mut report = JobReport::new("zone-cleanup");
        let now = Utc::now();
        let candidates = self.records.find_expired_zones(now).await?;
        log::info!("[zone-cleanup] {} expired zones", candidates.len());

        let orchestrator = &self.orchestrator;
        drive(&mut report, self.config.run_budget, candidates, |domain| async move {
            orchestrator.cleanup_zone(&domain, now).await
        })
        .await;

        report.log_summary();
        Ok(report)
    }
}

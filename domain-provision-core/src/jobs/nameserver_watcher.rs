//! Nameserver-change watcher.
//!
//! Runs every ~30 minutes: for each `waiting_ns_change` record, asks the zone
//! provider whether registrar-level delegation has landed and, if so, lets the
//! orchestrator create the proxy route.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ProvisioningOrchestrator;
use crate::traits::DomainRecordRepository;
use crate::types::{DomainStatus, JobReport};

use super::{drive, JobConfig};

pub struct NameserverWatcher {
    records: Arc<dyn DomainRecordRepository>,
    orchestrator: Arc<ProvisioningOrchestrator>,
    config: JobConfig,
}

impl NameserverWatcher {
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
        let mut report = JobReport::new("nameserver-watcher");
        let candidates = self
            .records
            .find_by_status(DomainStatus::WaitingNsChange)
            .await?;
        log::info!("[nameserver-watcher] {} candidate records", candidates.len());

        let orchestrator = &self.orchestrator;
        drive(&mut report, self.config.run_budget, candidates, |domain| async move {
            orchestrator.reconcile_nameserver_change(&domain).await
        })
        .await;

        report.log_summary();
        Ok(report)
    }
}

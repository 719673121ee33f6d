//! Periodic reconciliation jobs.
//!
//! Each job is one cron entry point: enumerate candidate records, invoke the
//! orchestrator per record, fold per-record outcomes into a [`JobReport`].
//! Scheduling itself lives outside the process; a run is a single batch.

mod availability_watcher;
mod nameserver_watcher;
mod zone_cleanup;

pub use availability_watcher::AvailabilityWatcher;
pub use nameserver_watcher::NameserverWatcher;
pub use zone_cleanup::ZoneCleanup;

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::CoreResult;
use crate::types::{DomainRecord, JobReport, ReconcileOutcome};

/// Per-run tuning shared by the three jobs.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Maximum `error`-state records re-entered per availability run, bounding
    /// the blast radius of a systemic proxy outage.
    pub error_retry_batch: usize,
    /// Wall-clock budget for one run; remaining candidates are abandoned and
    /// picked up by the next cycle.
    pub run_budget: Duration,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            error_retry_batch: 10,
            run_budget: Duration::from_secs(300),
        }
    }
}

/// Drive one candidate batch. A per-record failure never aborts the batch;
/// once the budget elapses the remainder is counted as abandoned.
async fn drive<F, Fut>(
    report: &mut JobReport,
    budget: Duration,
    candidates: Vec<DomainRecord>,
    op: F,
) where
    F: Fn(String) -> Fut,
    Fut: Future<Output = CoreResult<ReconcileOutcome>>,
{
    let deadline = Instant::now() + budget;
    let mut remaining = candidates.into_iter();
    while let Some(candidate) = remaining.next() {
        if Instant::now() >= deadline {
            report.abandoned = remaining.len() + 1;
            log::warn!(
                "[{}] run budget elapsed, {} records left for the next cycle",
                report.job,
                report.abandoned
            );
            break;
        }
        match op(candidate.domain.clone()).await {
            Ok(outcome) => report.record(&outcome),
            Err(e) => report.record_error(&candidate.domain, &e),
        }
    }
}

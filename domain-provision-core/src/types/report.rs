//! Structured per-record and per-run reconciliation outcomes.

use serde::Serialize;

use super::domain_record::DomainStatus;

/// What a single reconciliation attempt did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The record moved to a new status (or had its zone fields cleared).
    Transitioned,
    /// Preconditions held but external truth hasn't changed yet.
    Unchanged,
    /// An external call failed; the record holds a diagnostic.
    Failed,
    /// The record was claimed by a concurrent run, or its status no longer
    /// matched the operation's precondition.
    Skipped,
}

/// Structured outcome of one reconciliation attempt, the orchestrator's only
/// required side-channel besides persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    pub domain: String,
    pub previous: DomainStatus,
    pub new: DomainStatus,
    pub kind: OutcomeKind,
    pub error: Option<String>,
}

impl ReconcileOutcome {
    #[must_use]
    pub fn transitioned(domain: &str, previous: DomainStatus, new: DomainStatus) -> Self {
        Self {
            domain: domain.to_string(),
            previous,
            new,
            kind: OutcomeKind::Transitioned,
            error: None,
        }
    }

    #[must_use]
    pub fn unchanged(domain: &str, status: DomainStatus) -> Self {
        Self {
            domain: domain.to_string(),
            previous: status,
            new: status,
            kind: OutcomeKind::Unchanged,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(
        domain: &str,
        previous: DomainStatus,
        new: DomainStatus,
        error: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.to_string(),
            previous,
            new,
            kind: OutcomeKind::Failed,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn skipped(domain: &str, status: DomainStatus) -> Self {
        Self {
            domain: domain.to_string(),
            previous: status,
            new: status,
            kind: OutcomeKind::Skipped,
            error: None,
        }
    }

    /// Emit the structured log line for this outcome.
    pub fn log(&self) {
        match self.kind {
            OutcomeKind::Transitioned => log::info!(
                "[orchestrator] {}: {} -> {}",
                self.domain,
                self.previous,
                self.new
            ),
            OutcomeKind::Unchanged => {
                log::debug!("[orchestrator] {}: {} (unchanged)", self.domain, self.previous);
            }
            OutcomeKind::Failed => log::warn!(
                "[orchestrator] {}: {} -> {} ({})",
                self.domain,
                self.previous,
                self.new,
                self.error.as_deref().unwrap_or("unknown error")
            ),
            OutcomeKind::Skipped => {
                log::debug!("[orchestrator] {}: skipped (claimed or stale)", self.domain);
            }
        }
    }
}

/// Aggregate summary of one job run.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    /// Job name, for logs.
    pub job: &'static str,
    /// Candidate records considered.
    pub processed: usize,
    pub transitioned: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Records left for the next cycle because the run budget elapsed.
    pub abandoned: usize,
}

impl JobReport {
    #[must_use]
    pub fn new(job: &'static str) -> Self {
        Self {
            job,
            processed: 0,
            transitioned: 0,
            unchanged: 0,
            failed: 0,
            skipped: 0,
            abandoned: 0,
        }
    }

    /// Fold one per-record outcome into the summary (and log it).
    pub fn record(&mut self, outcome: &ReconcileOutcome) {
        outcome.log();
        self.processed += 1;
        match outcome.kind {
            OutcomeKind::Transitioned => self.transitioned += 1,
            OutcomeKind::Unchanged => self.unchanged += 1,
            OutcomeKind::Failed => self.failed += 1,
            OutcomeKind::Skipped => self.skipped += 1,
        }
    }

    /// Count a record whose reconciliation returned a hard error (storage or
    /// precondition failure); the batch continues regardless.
    pub fn record_error(&mut self, domain: &str, error: &crate::error::CoreError) {
        if error.is_expected() {
            log::warn!("[orchestrator] {domain}: {error}");
        } else {
            log::error!("[orchestrator] {domain}: {error}");
        }
        self.processed += 1;
        self.failed += 1;
    }

    /// Emit the end-of-run summary line.
    pub fn log_summary(&self) {
        log::info!(
            "[{}] run complete: {} processed, {} transitioned, {} unchanged, {} failed, {} skipped, {} abandoned",
            self.job,
            self.processed,
            self.transitioned,
            self.unchanged,
            self.failed,
            self.skipped,
            self.abandoned
        );
    }
}

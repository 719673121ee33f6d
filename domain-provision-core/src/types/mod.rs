//! Core domain types.

mod domain_record;
mod report;

pub use domain_record::{
    DelegationMode, DomainRecord, DomainStatus, LAST_ERROR_MAX_LEN,
};
pub use report::{JobReport, OutcomeKind, ReconcileOutcome};

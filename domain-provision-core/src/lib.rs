//! Domain Provisioning Core Library
//!
//! State machine and reconciliation logic for connecting tenant custom
//! domains to the platform: zone creation, nameserver-delegation watching,
//! proxy route configuration, availability probing, and grace-period zone
//! cleanup.
//!
//! Platform-independent: persistence and external services are abstracted
//! through traits, implemented by the app crate (`SeaORM`/sqlite, HTTP
//! clients) and by in-memory mocks in tests.

pub mod error;
pub mod jobs;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{ClientError, CoreError, CoreResult};
pub use jobs::{AvailabilityWatcher, JobConfig, NameserverWatcher, ZoneCleanup};
pub use services::{ProvisioningOrchestrator, ServiceContext};
pub use traits::{DomainRecordRepository, TenantDefaults};
pub use types::{DomainRecord, DomainStatus, JobReport};

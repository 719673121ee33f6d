//! Storage and collaborator abstraction traits.

mod domain_record_repository;
mod tenant_defaults;

pub use domain_record_repository::DomainRecordRepository;
pub use tenant_defaults::TenantDefaults;

// External-service seams live in the client crate next to their
// implementations; re-exported here for consumers of the core.
pub use domain_provision_client::{NotificationSink, ProxyAdmin, ReachabilityProbe, ZoneProvider};

//! External-service clients for tenant custom-domain provisioning.
//!
//! Thin, stateless HTTP wrappers around the three systems the provisioning
//! orchestrator coordinates, plus outbound mail:
//! - [`HostedZoneClient`]: DNS/zone provider REST API
//! - [`ProxyAdminClient`]: reverse-proxy control API
//! - [`HttpsProbe`]: external HTTPS reachability check
//! - [`MailerClient`]: transactional mail API
//!
//! Each client implements a seam trait ([`ZoneProvider`], [`ProxyAdmin`],
//! [`ReachabilityProbe`], [`NotificationSink`]) so the core can be tested
//! against mocks. No retry/backoff lives in this crate: a failed call is
//! simply retried on the next reconciliation cycle.

pub mod error;
pub mod http;
mod notify;
mod probe;
mod proxy;
mod traits;
mod types;
mod zone;

pub use error::{ClientError, Result};
pub use notify::MailerClient;
pub use probe::HttpsProbe;
pub use proxy::ProxyAdminClient;
pub use traits::{NotificationSink, ProxyAdmin, ReachabilityProbe, ZoneProvider};
pub use types::{
    DelegationStatus, DeleteZoneOutcome, ProbeOutcome, RemoveRouteOutcome, Route, RouteHealth, Zone,
};
pub use zone::HostedZoneClient;

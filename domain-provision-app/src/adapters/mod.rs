//! Concrete adapters behind the core's seam traits.

mod sqlite;
mod tenant_defaults;

pub use sqlite::SqliteStore;
pub use tenant_defaults::PlatformTenantDefaults;

//! Tenant-defaults application seam.

use async_trait::async_trait;

use crate::error::CoreResult;

/// Applies platform defaults (theme, starter pages, settings) to a tenant
/// after its custom domain is first routed.
///
/// Invoked once per successful route creation. A failure here is logged by
/// the orchestrator but never reverts the zone/route already created; the
/// record stays recoverable and the defaults can be applied manually.
#[async_trait]
pub trait TenantDefaults: Send + Sync {
    async fn apply_defaults(&self, tenant_id: &str) -> CoreResult<()>;
}

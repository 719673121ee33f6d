//! `DomainRecordRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set,
    sea_query::{Expr, OnConflict},
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use domain_provision_core::error::{CoreError, CoreResult};
use domain_provision_core::traits::DomainRecordRepository;
use domain_provision_core::types::{DelegationMode, DomainRecord, DomainStatus};

use super::entity::domain_record;
use super::SqliteStore;

fn parse_timestamp(field: &str, raw: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::SerializationError(format!("Invalid {field}: {e}")))
}

impl domain_record::Model {
    /// Convert a `SeaORM` row model into a `DomainRecord`.
    fn into_record(self) -> CoreResult<DomainRecord> {
        let status = DomainStatus::parse(&self.status).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid status: {}", self.status))
        })?;
        let delegation_mode = DelegationMode::parse(&self.delegation_mode).ok_or_else(|| {
            CoreError::SerializationError(format!(
                "Invalid delegation_mode: {}",
                self.delegation_mode
            ))
        })?;
        let grace_period_until = self
            .grace_period_until
            .map(|s| parse_timestamp("grace_period_until", &s))
            .transpose()?;
        let configured_at = self
            .configured_at
            .map(|s| parse_timestamp("configured_at", &s))
            .transpose()?;
        let updated_at = parse_timestamp("updated_at", &self.updated_at)?;

        Ok(DomainRecord {
            tenant_id: self.tenant_id,
            domain: self.domain,
            status,
            delegation_mode,
            zone_id: self.zone_id,
            route_id: self.route_id,
            grace_period_until,
            last_error: self.last_error,
            notify_email: self.notify_email,
            configured_at,
            updated_at,
        })
    }
}

/// Convert a record into an active model for upsert. `in_flight` is only
/// meaningful on insert; updates leave the column alone so a save while
/// holding the claim does not drop it.
fn record_to_active_model(record: &DomainRecord) -> domain_record::ActiveModel {
    domain_record::ActiveModel {
        domain: Set(record.domain.clone()),
        tenant_id: Set(record.tenant_id.clone()),
        status: Set(record.status.as_str().to_string()),
        delegation_mode: Set(record.delegation_mode.as_str().to_string()),
        zone_id: Set(record.zone_id.clone()),
        route_id: Set(record.route_id.clone()),
        grace_period_until: Set(record.grace_period_until.map(|dt| dt.to_rfc3339())),
        last_error: Set(record.last_error.clone()),
        notify_email: Set(record.notify_email.clone()),
        configured_at: Set(record.configured_at.map(|dt| dt.to_rfc3339())),
        updated_at: Set(record.updated_at.to_rfc3339()),
        in_flight: Set(0),
    }
}

#[async_trait]
impl DomainRecordRepository for SqliteStore {
    async fn find_by_domain(&self, domain: &str) -> CoreResult<Option<DomainRecord>> {
        let row = domain_record::Entity::find_by_id(domain)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query record: {e}")))?;

        row.map(domain_record::Model::into_record).transpose()
    }

    async fn find_by_tenant(&self, tenant_id: &str) -> CoreResult<Vec<DomainRecord>> {
        let rows = domain_record::Entity::find()
            .filter(domain_record::Column::TenantId.eq(tenant_id))
            .order_by_asc(domain_record::Column::Domain)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query by tenant: {e}")))?;

        rows.into_iter()
            .map(domain_record::Model::into_record)
            .collect()
    }

    async fn find_by_status(&self, status: DomainStatus) -> CoreResult<Vec<DomainRecord>> {
        let rows = domain_record::Entity::find()
            .filter(domain_record::Column::Status.eq(status.as_str()))
            .order_by_asc(domain_record::Column::Domain)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query by status: {e}")))?;

        rows.into_iter()
            .map(domain_record::Model::into_record)
            .collect()
    }

    async fn find_route_retry_candidates(&self, limit: usize) -> CoreResult<Vec<DomainRecord>> {
        let rows = domain_record::Entity::find()
            .filter(domain_record::Column::Status.eq(DomainStatus::Error.as_str()))
            .filter(domain_record::Column::RouteId.is_null())
            .order_by_asc(domain_record::Column::UpdatedAt)
            .limit(u64::try_from(limit).unwrap_or(u64::MAX))
            .all(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to query retry candidates: {e}"))
            })?;

        rows.into_iter()
            .map(domain_record::Model::into_record)
            .collect()
    }

    async fn find_expired_zones(&self, now: DateTime<Utc>) -> CoreResult<Vec<DomainRecord>> {
        // RFC 3339 timestamps normalized to UTC compare lexicographically.
        let rows = domain_record::Entity::find()
            .filter(domain_record::Column::DelegationMode.eq(DelegationMode::External.as_str()))
            .filter(domain_record::Column::ZoneId.is_not_null())
            .filter(domain_record::Column::GracePeriodUntil.is_not_null())
            .filter(domain_record::Column::GracePeriodUntil.lte(now.to_rfc3339()))
            .order_by_asc(domain_record::Column::Domain)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query expired zones: {e}")))?;

        rows.into_iter()
            .map(domain_record::Model::into_record)
            .collect()
    }

    async fn save(&self, record: &DomainRecord) -> CoreResult<()> {
        let active_model = record_to_active_model(record);

        domain_record::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(domain_record::Column::Domain)
                    .update_columns([
                        domain_record::Column::TenantId,
                        domain_record::Column::Status,
                        domain_record::Column::DelegationMode,
                        domain_record::Column::ZoneId,
                        domain_record::Column::RouteId,
                        domain_record::Column::GracePeriodUntil,
                        domain_record::Column::LastError,
                        domain_record::Column::NotifyEmail,
                        domain_record::Column::ConfiguredAt,
                        domain_record::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to upsert record: {e}")))?;

        Ok(())
    }

    async fn try_claim(&self, domain: &str) -> CoreResult<bool> {
        // Conditional update: only one claimant flips 0 -> 1.
        let result = domain_record::Entity::update_many()
            .col_expr(domain_record::Column::InFlight, Expr::value(1))
            .filter(domain_record::Column::Domain.eq(domain))
            .filter(domain_record::Column::InFlight.eq(0))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to claim record: {e}")))?;

        Ok(result.rows_affected == 1)
    }

    async fn release(&self, domain: &str) -> CoreResult<()> {
        domain_record::Entity::update_many()
            .col_expr(domain_record::Column::InFlight, Expr::value(0))
            .filter(domain_record::Column::Domain.eq(domain))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to release claim: {e}")))?;

        Ok(())
    }
}

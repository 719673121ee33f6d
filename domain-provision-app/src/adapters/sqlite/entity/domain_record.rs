use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "domain_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub domain: String,
    pub tenant_id: String,
    pub status: String,
    pub delegation_mode: String,
    pub zone_id: Option<String>,
    pub route_id: Option<String>,
    pub grace_period_until: Option<String>,
    pub last_error: Option<String>,
    pub notify_email: Option<String>,
    pub configured_at: Option<String>,
    pub updated_at: String,
    /// Advisory reconciliation claim; 1 while a run owns the record.
    pub in_flight: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DomainRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DomainRecord::Domain)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DomainRecord::TenantId).string().not_null())
                    .col(ColumnDef::new(DomainRecord::Status).string().not_null())
                    .col(
                        ColumnDef::new(DomainRecord::DelegationMode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DomainRecord::ZoneId).string().null())
                    .col(ColumnDef::new(DomainRecord::RouteId).string().null())
                    .col(
                        ColumnDef::new(DomainRecord::GracePeriodUntil)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(DomainRecord::LastError).string().null())
                    .col(ColumnDef::new(DomainRecord::NotifyEmail).string().null())
                    .col(ColumnDef::new(DomainRecord::ConfiguredAt).string().null())
                    .col(ColumnDef::new(DomainRecord::UpdatedAt).string().not_null())
                    .col(
                        ColumnDef::new(DomainRecord::InFlight)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // The watchers enumerate by status every run.
        manager
            .create_index(
                Index::create()
                    .name("idx_domain_records_status")
                    .table(DomainRecord::Table)
                    .col(DomainRecord::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DomainRecord::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum DomainRecord {
    #[sea_orm(iden = "domain_records")]
    Table,
    Domain,
    TenantId,
    Status,
    DelegationMode,
    ZoneId,
    RouteId,
    GracePeriodUntil,
    LastError,
    NotifyEmail,
    ConfiguredAt,
    UpdatedAt,
    InFlight,
}

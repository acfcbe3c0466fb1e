//! Database migrations for apps service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_apps::Migration)]
    }
}

mod m20250101_000001_create_apps {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Apps::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Apps::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Apps::TenantId).string().not_null())
                        .col(ColumnDef::new(Apps::Name).string().not_null())
                        .col(ColumnDef::new(Apps::Mode).string().not_null())
                        .col(ColumnDef::new(Apps::Icon).string())
                        .col(ColumnDef::new(Apps::IconBackground).string())
                        .col(ColumnDef::new(Apps::AppModelConfigId).uuid())
                        .col(
                            ColumnDef::new(Apps::Status)
                                .string()
                                .not_null()
                                .default("normal"),
                        )
                        .col(flag(Apps::EnableSite))
                        .col(flag(Apps::EnableApi))
                        .col(counter(Apps::ApiRpm))
                        .col(counter(Apps::ApiRph))
                        .col(flag(Apps::IsDemo))
                        .col(flag(Apps::IsPublic))
                        .col(flag(Apps::IsUniversal))
                        .col(
                            ColumnDef::new(Apps::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Apps::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_apps_name_unique")
                        .table(Apps::Table)
                        .col(Apps::Name)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_apps_created_at")
                        .table(Apps::Table)
                        .col(Apps::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_apps_tenant_id")
                        .table(Apps::Table)
                        .col(Apps::TenantId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Apps::Table).to_owned())
                .await
        }
    }

    fn flag(col: Apps) -> ColumnDef {
        ColumnDef::new(col).boolean().not_null().default(false).to_owned()
    }

    fn counter(col: Apps) -> ColumnDef {
        ColumnDef::new(col).integer().not_null().default(0).to_owned()
    }

    #[derive(DeriveIden)]
    enum Apps {
        Table,
        Id,
        TenantId,
        Name,
        Mode,
        Icon,
        IconBackground,
        AppModelConfigId,
        Status,
        EnableSite,
        EnableApi,
        ApiRpm,
        ApiRph,
        IsDemo,
        IsPublic,
        IsUniversal,
        CreatedAt,
        UpdatedAt,
    }
}

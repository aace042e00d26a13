use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // owned_domains 表：注册商持有的域名
        manager
            .create_table(
                Table::create()
                    .table(OwnedDomain::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OwnedDomain::Name)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OwnedDomain::Status).string().not_null())
                    .col(
                        ColumnDef::new(OwnedDomain::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OwnedDomain::ObtainedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OwnedDomain::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // provisioned_records 表：操作员创建的记录（base_domain 不设外键）
        manager
            .create_table(
                Table::create()
                    .table(ProvisionedRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProvisionedRecord::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProvisionedRecord::Prefix).string().not_null())
                    .col(ColumnDef::new(ProvisionedRecord::Kind).string().not_null())
                    .col(
                        ColumnDef::new(ProvisionedRecord::BaseDomain)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProvisionedRecord::TargetHost)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProvisionedRecord::Ttl)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProvisionedRecord::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ProvisionedRecord::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProvisionedRecord::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OwnedDomain::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum OwnedDomain {
    #[sea_orm(iden = "owned_domains")]
    Table,
    Name,
    Status,
    ExpiresAt,
    ObtainedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProvisionedRecord {
    #[sea_orm(iden = "provisioned_records")]
    Table,
    Id,
    Prefix,
    Kind,
    BaseDomain,
    TargetHost,
    Ttl,
    Description,
    CreatedAt,
}

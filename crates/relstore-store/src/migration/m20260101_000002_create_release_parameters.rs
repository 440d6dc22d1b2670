use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_content_releases::ContentReleases;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReleaseParameters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReleaseParameters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReleaseParameters::ReleaseId).uuid().not_null())
                    .col(ColumnDef::new(ReleaseParameters::Key).string_len(255).not_null())
                    .col(ColumnDef::new(ReleaseParameters::Value).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReleaseParameters::Table, ReleaseParameters::ReleaseId)
                            .to(ContentReleases::Table, ContentReleases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_release_parameters_unique")
                    .table(ReleaseParameters::Table)
                    .col(ReleaseParameters::ReleaseId)
                    .col(ReleaseParameters::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_release_parameters_key_value")
                    .table(ReleaseParameters::Table)
                    .col(ReleaseParameters::Key)
                    .col(ReleaseParameters::Value)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReleaseParameters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReleaseParameters {
    Table,
    Id,
    ReleaseId,
    Key,
    Value,
}

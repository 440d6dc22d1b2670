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
                    .table(ReleaseDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReleaseDocuments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReleaseDocuments::ReleaseId).uuid().not_null())
                    .col(
                        ColumnDef::new(ReleaseDocuments::DocumentKey)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReleaseDocuments::ContentType)
                            .string_len(64)
                            .not_null()
                            .default("content"),
                    )
                    .col(ColumnDef::new(ReleaseDocuments::DocumentJson).json_binary())
                    .col(
                        ColumnDef::new(ReleaseDocuments::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ReleaseDocuments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ReleaseDocuments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReleaseDocuments::Table, ReleaseDocuments::ReleaseId)
                            .to(ContentReleases::Table, ContentReleases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_release_documents_unique")
                    .table(ReleaseDocuments::Table)
                    .col(ReleaseDocuments::ReleaseId)
                    .col(ReleaseDocuments::DocumentKey)
                    .col(ReleaseDocuments::ContentType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_release_documents_key_type")
                    .table(ReleaseDocuments::Table)
                    .col(ReleaseDocuments::DocumentKey)
                    .col(ReleaseDocuments::ContentType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReleaseDocuments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReleaseDocuments {
    Table,
    Id,
    ReleaseId,
    DocumentKey,
    ContentType,
    DocumentJson,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

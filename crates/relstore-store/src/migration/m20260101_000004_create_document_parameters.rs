use sea_orm_migration::prelude::*;

use super::m20260101_000003_create_release_documents::ReleaseDocuments;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentParameters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentParameters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DocumentParameters::ReleaseDocumentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentParameters::Key).string_len(255).not_null())
                    .col(ColumnDef::new(DocumentParameters::Value).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(DocumentParameters::Table, DocumentParameters::ReleaseDocumentId)
                            .to(ReleaseDocuments::Table, ReleaseDocuments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_parameters_unique")
                    .table(DocumentParameters::Table)
                    .col(DocumentParameters::ReleaseDocumentId)
                    .col(DocumentParameters::Key)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentParameters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DocumentParameters {
    Table,
    Id,
    ReleaseDocumentId,
    Key,
    Value,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentReleases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentReleases::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContentReleases::SiteCode)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentReleases::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentReleases::Version)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentReleases::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ContentReleases::IsLive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ContentReleases::PublishDatetime).timestamp_with_time_zone())
                    .col(ColumnDef::new(ContentReleases::BaseRelease).uuid())
                    .col(
                        ColumnDef::new(ContentReleases::UseCurrentLiveAsBaseRelease)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ContentReleases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContentReleases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ContentReleases::Table, ContentReleases::BaseRelease)
                            .to(ContentReleases::Table, ContentReleases::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_releases_site_title_version")
                    .table(ContentReleases::Table)
                    .col(ContentReleases::SiteCode)
                    .col(ContentReleases::Title)
                    .col(ContentReleases::Version)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_releases_site_live")
                    .table(ContentReleases::Table)
                    .col(ContentReleases::SiteCode)
                    .col(ContentReleases::IsLive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentReleases::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ContentReleases {
    Table,
    Id,
    SiteCode,
    Title,
    Version,
    Status,
    IsLive,
    PublishDatetime,
    BaseRelease,
    UseCurrentLiveAsBaseRelease,
    CreatedAt,
    UpdatedAt,
}

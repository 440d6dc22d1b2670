use sea_orm_migration::prelude::*;

mod m20260101_000001_create_content_releases;
mod m20260101_000002_create_release_parameters;
mod m20260101_000003_create_release_documents;
mod m20260101_000004_create_document_parameters;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_content_releases::Migration),
            Box::new(m20260101_000002_create_release_parameters::Migration),
            Box::new(m20260101_000003_create_release_documents::Migration),
            Box::new(m20260101_000004_create_document_parameters::Migration),
        ]
    }
}

pub mod config;
pub mod convert;
pub mod entities;
pub mod error;
pub mod migration;
pub mod sea_orm_store;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use migration::Migrator;
pub use sea_orm_store::SeaOrmStore;
pub use store::{NewRelease, NewReleaseDocument, Store};

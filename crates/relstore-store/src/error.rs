use thiserror::Error;

/// Errors surfaced by the persistence adapter. Anything a caller needs to
/// branch on domain-wise is already a [`relstore_core::Error`]; this type
/// exists for the failures that only the adapter can produce.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Domain(#[from] relstore_core::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for relstore_core::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => e,
            StoreError::Database(e) => {
                relstore_core::Error::Store(relstore_core::StoreErrorSource(e.to_string()))
            }
        }
    }
}

pub mod error;
pub mod id;
pub mod models;
pub mod state_machine;

pub use error::{Error, Result, StoreErrorSource};
pub use id::generate_id;
pub use models::{
    DocumentIdentity, ReleaseDocument, ReleaseParameter, ReleaseStatus, DEFAULT_CONTENT_TYPE,
};
pub use models::Release;

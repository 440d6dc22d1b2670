use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use relstore_core::{DocumentIdentity, Release, ReleaseDocument, ReleaseParameter, ReleaseStatus};

use crate::error::StoreResult;

/// Fields needed to create a new release row (spec §3, §4.1).
#[derive(Debug, Clone)]
pub struct NewRelease {
    pub site_code: String,
    pub title: String,
    pub version: String,
    pub base_release: Option<Uuid>,
    pub use_current_live_as_base_release: bool,
}

/// Fields needed to attach (or replace) a document on a release (spec §4.5).
#[derive(Debug, Clone)]
pub struct NewReleaseDocument {
    pub document_key: String,
    pub content_type: String,
    pub document_json: Option<String>,
}

/// The persistence boundary: every operation is one transaction (spec §5 —
/// "Concurrency & Resource Model"). Business rules (status preconditions,
/// baseline resolution, diffing) live one layer up in `relstore-release`;
/// this trait only knows how to read and write rows.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_release(&self, input: NewRelease) -> StoreResult<Release>;
    async fn find_release(&self, id: Uuid) -> StoreResult<Option<Release>>;
    async fn find_release_by_title_version(
        &self,
        site_code: &str,
        title: &str,
        version: &str,
    ) -> StoreResult<Vec<Release>>;
    async fn list_releases(
        &self,
        site_code: &str,
        status: Option<ReleaseStatus>,
        since: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<Release>>;
    async fn find_live_release(&self, site_code: &str) -> StoreResult<Option<Release>>;

    async fn update_release_title_version(
        &self,
        id: Uuid,
        title: Option<String>,
        version: Option<String>,
    ) -> StoreResult<Release>;
    async fn update_release_status(
        &self,
        id: Uuid,
        status: ReleaseStatus,
        publish_datetime: Option<DateTime<Utc>>,
    ) -> StoreResult<Release>;
    /// Clears `is_live` on the site's current live release, if any, and
    /// promotes `id` to LIVE, in one transaction (spec §4.2 steps 1-3).
    async fn promote_to_live(
        &self,
        site_code: &str,
        id: Uuid,
        publish_datetime: DateTime<Utc>,
    ) -> StoreResult<Release>;
    async fn delete_release(&self, id: Uuid) -> StoreResult<()>;

    async fn upsert_release_parameter(&self, release_id: Uuid, key: &str, value: &str) -> StoreResult<()>;
    async fn get_release_parameter(&self, release_id: Uuid, key: &str) -> StoreResult<Option<String>>;
    async fn list_release_parameters(&self, release_id: Uuid) -> StoreResult<Vec<ReleaseParameter>>;
    /// Removes every parameter currently set on a release (spec §4.7's
    /// `clear_first` flag on `update_content_release_parameters`).
    async fn clear_release_parameters(&self, release_id: Uuid) -> StoreResult<()>;
    async fn find_releases_by_parameter(
        &self,
        site_code: &str,
        key: &str,
        value: &str,
    ) -> StoreResult<Vec<Release>>;

    async fn attach_document(
        &self,
        release_id: Uuid,
        doc: NewReleaseDocument,
    ) -> StoreResult<ReleaseDocument>;
    async fn tombstone_document(
        &self,
        release_id: Uuid,
        identity: &DocumentIdentity,
    ) -> StoreResult<ReleaseDocument>;
    async fn remove_document(&self, release_id: Uuid, identity: &DocumentIdentity) -> StoreResult<()>;
    async fn find_document(
        &self,
        release_id: Uuid,
        identity: &DocumentIdentity,
    ) -> StoreResult<Option<ReleaseDocument>>;
    async fn list_documents(&self, release_id: Uuid) -> StoreResult<Vec<ReleaseDocument>>;

    async fn upsert_document_parameter(
        &self,
        release_document_id: Uuid,
        key: &str,
        value: &str,
    ) -> StoreResult<()>;
    async fn get_document_parameter(
        &self,
        release_document_id: Uuid,
        key: &str,
    ) -> StoreResult<Option<String>>;
}

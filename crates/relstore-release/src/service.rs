//! Release lifecycle operations (spec §4.5): create, update, remove, and
//! the status transitions from §4.2, wired to a [`Store`]. Grounded in
//! `rustok-content::services::NodeService`'s shape — a thin service struct
//! holding the connection/store, one `tracing::instrument`ed method per
//! operation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use relstore_core::{
    state_machine, DocumentIdentity, Error, Release, ReleaseDocument, ReleaseParameter,
    ReleaseStatus, Result,
};
use relstore_store::{NewRelease, NewReleaseDocument, Store};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::effective_view::effective_view;

pub struct ReleaseService<S: Store> {
    store: S,
}

impl<S: Store> ReleaseService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self), fields(site_code = %site_code, title = %title, version = %version))]
    pub async fn create_release(
        &self,
        site_code: &str,
        title: &str,
        version: &str,
        base_release: Option<Uuid>,
        use_current_live_as_base_release: bool,
    ) -> Result<Release> {
        let existing = self
            .store
            .find_release_by_title_version(site_code, title, version)
            .await?;
        if !existing.is_empty() {
            return Err(Error::ContentReleaseAlreadyExists);
        }

        let resolved_base = if use_current_live_as_base_release {
            self.store
                .find_live_release(site_code)
                .await?
                .map(|r| r.uuid)
        } else {
            if let Some(base_id) = base_release {
                self.store
                    .find_release(base_id)
                    .await?
                    .ok_or(Error::BaseContentReleaseDoesNotExist)?;
            }
            base_release
        };

        let release = self
            .store
            .create_release(NewRelease {
                site_code: site_code.to_string(),
                title: title.to_string(),
                version: version.to_string(),
                base_release: resolved_base,
                use_current_live_as_base_release,
            })
            .await?;
        info!(release_id = %release.uuid, "content release created");
        Ok(release)
    }

    pub async fn get_release(&self, id: Uuid) -> Result<Release> {
        self.store
            .find_release(id)
            .await?
            .ok_or(Error::ContentReleaseDoesNotExist)
    }

    pub async fn list_releases(
        &self,
        site_code: &str,
        status: Option<ReleaseStatus>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Release>> {
        Ok(self.store.list_releases(site_code, status, since).await?)
    }

    pub async fn get_live_release(&self, site_code: &str) -> Result<Release> {
        self.store
            .find_live_release(site_code)
            .await?
            .ok_or(Error::NoContentReleaseLive)
    }

    #[instrument(skip(self, title, version), fields(release_id = %id))]
    pub async fn update_release(
        &self,
        id: Uuid,
        title: Option<String>,
        version: Option<String>,
    ) -> Result<Release> {
        if title.is_none() && version.is_none() {
            return Err(Error::ContentReleaseTitleVersionNotDefined);
        }
        self.get_release(id).await?;
        Ok(self.store.update_release_title_version(id, title, version).await?)
    }

    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn remove_release(&self, id: Uuid) -> Result<()> {
        self.get_release(id).await?;
        self.store.delete_release(id).await?;
        info!(release_id = %id, "content release removed");
        Ok(())
    }

    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn freeze(&self, id: Uuid, publish_datetime: DateTime<Utc>) -> Result<Release> {
        let release = self.get_release(id).await?;
        let now = Utc::now();
        let status = state_machine::freeze(release.status, publish_datetime, now)?;
        Ok(self
            .store
            .update_release_status(id, status, Some(publish_datetime))
            .await?)
    }

    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn unfreeze(&self, id: Uuid) -> Result<Release> {
        let release = self.get_release(id).await?;
        let now = Utc::now();
        let status = state_machine::unfreeze(release.status, release.publish_datetime, now)?;
        Ok(self.store.update_release_status(id, status, None).await?)
    }

    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn set_stage(&self, id: Uuid) -> Result<Release> {
        let release = self.get_release(id).await?;
        let status = state_machine::set_stage(release.status)?;
        Ok(self.store.update_release_status(id, status, None).await?)
    }

    /// `set_live`: validates the transition locally, then delegates the
    /// "exactly one live release per site" swap to the store's
    /// [`Store::promote_to_live`] (spec §4.2 steps 1-3).
    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn set_live(&self, id: Uuid) -> Result<Release> {
        let release = self.get_release(id).await?;
        state_machine::set_live(release.status)?;
        let now = Utc::now();
        let promoted = self.store.promote_to_live(&release.site_code, id, now).await?;
        info!(release_id = %id, "content release is now live");
        Ok(promoted)
    }

    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn archive(&self, id: Uuid) -> Result<Release> {
        let release = self.get_release(id).await?;
        let now = Utc::now();
        let status = state_machine::archive(release.publish_datetime, now)?;
        Ok(self
            .store
            .update_release_status(id, status, release.publish_datetime)
            .await?)
    }

    /// `unarchive`: like `set_live`, this re-establishes LIVE status, so it
    /// goes through `promote_to_live` to keep the one-live-per-site
    /// invariant rather than writing the status column directly.
    #[instrument(skip(self), fields(release_id = %id))]
    pub async fn unarchive(&self, id: Uuid) -> Result<Release> {
        let release = self.get_release(id).await?;
        let now = Utc::now();
        state_machine::unarchive(release.status, release.publish_datetime, now)?;
        let publish_datetime = release
            .publish_datetime
            .expect("unarchive precondition guarantees a publish_datetime");
        Ok(self
            .store
            .promote_to_live(&release.site_code, id, publish_datetime)
            .await?)
    }

    /// `clear_first`: remove all existing parameters before upserting
    /// `parameters`, so a caller passing a fresh `params` map ends up with
    /// exactly those keys rather than a union with whatever was set before
    /// (spec §4.7).
    pub async fn update_release_parameters(
        &self,
        id: Uuid,
        parameters: BTreeMap<String, String>,
        clear_first: bool,
    ) -> Result<()> {
        self.get_release(id).await?;
        if clear_first {
            self.store.clear_release_parameters(id).await?;
        }
        for (key, value) in parameters {
            self.store.upsert_release_parameter(id, &key, &value).await?;
        }
        Ok(())
    }

    pub async fn get_release_parameter(&self, id: Uuid, key: &str) -> Result<String> {
        self.get_release(id).await?;
        self.store
            .get_release_parameter(id, key)
            .await?
            .ok_or(Error::ContentReleaseExtraParameterDoesNotExist)
    }

    pub async fn list_release_parameters(&self, id: Uuid) -> Result<Vec<ReleaseParameter>> {
        self.get_release(id).await?;
        Ok(self.store.list_release_parameters(id).await?)
    }

    #[instrument(skip(self, document_json, parameters), fields(release_id = %release_id, document_key = %document_key))]
    pub async fn publish_document(
        &self,
        release_id: Uuid,
        document_key: &str,
        content_type: &str,
        document_json: String,
        parameters: BTreeMap<String, String>,
    ) -> Result<ReleaseDocument> {
        self.get_release(release_id).await?;
        let doc = self
            .store
            .attach_document(
                release_id,
                NewReleaseDocument {
                    document_key: document_key.to_string(),
                    content_type: content_type.to_string(),
                    document_json: Some(document_json),
                },
            )
            .await?;
        for (key, value) in parameters {
            self.store.upsert_document_parameter(doc.id, &key, &value).await?;
        }
        Ok(doc)
    }

    /// Severs the release↔document link (spec §4.5). Fails
    /// `release_document_does_not_exist` if this release never published
    /// the key. The document row itself is a per-release attachment here
    /// (see the many-to-many simplification noted in DESIGN.md), so
    /// removing it already is the "delete if no remaining links" step the
    /// spec describes for a shared document store.
    #[instrument(skip(self), fields(release_id = %release_id, document_key = %identity.document_key))]
    pub async fn unpublish_document(
        &self,
        release_id: Uuid,
        identity: &DocumentIdentity,
    ) -> Result<ReleaseDocument> {
        self.get_release(release_id).await?;
        let doc = self
            .store
            .find_document(release_id, identity)
            .await?
            .ok_or(Error::ReleaseDocumentDoesNotExist)?;
        self.store.remove_document(release_id, identity).await?;
        Ok(doc)
    }

    /// Idempotent tombstone (spec §4.5): masks the key within `V(R)` even
    /// when it was never published by this release but inherited from a
    /// base release. A later `publish_document` on the same key lifts it.
    #[instrument(skip(self), fields(release_id = %release_id, document_key = %identity.document_key))]
    pub async fn delete_document(&self, release_id: Uuid, identity: &DocumentIdentity) -> Result<ReleaseDocument> {
        self.get_release(release_id).await?;
        Ok(self.store.tombstone_document(release_id, identity).await?)
    }

    /// Resolves a document through the baseline chain, not just the
    /// release's own attachments (spec §4.4).
    pub async fn get_document(&self, release_id: Uuid, identity: &DocumentIdentity) -> Result<ReleaseDocument> {
        self.get_release(release_id).await?;
        effective_view(&self.store, release_id)
            .await?
            .into_iter()
            .find(|doc| &doc.identity() == identity)
            .ok_or(Error::ReleaseDocumentDoesNotExist)
    }

    pub async fn effective_view(&self, release_id: Uuid) -> Result<Vec<ReleaseDocument>> {
        self.get_release(release_id).await?;
        effective_view(&self.store, release_id).await
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use relstore_core::{generate_id, DocumentIdentity, Error as DomainError, Release, ReleaseDocument, ReleaseParameter, ReleaseStatus};

use crate::convert::{identity_matches, release_document_from_model, release_from_model, release_parameter_from_model};
use crate::entities::{document_parameter, release, release_document, release_parameter};
use crate::error::{StoreError, StoreResult};
use crate::store::{NewRelease, NewReleaseDocument, Store};

/// SeaORM-backed [`Store`] implementation.
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl Store for SeaOrmStore {
    #[instrument(skip(self, input), fields(site_code = %input.site_code))]
    async fn create_release(&self, input: NewRelease) -> StoreResult<Release> {
        let now = Utc::now();
        let model = release::ActiveModel {
            id: Set(generate_id()),
            site_code: Set(input.site_code),
            title: Set(input.title),
            version: Set(input.version),
            status: Set(ReleaseStatus::Preview.as_i32()),
            is_live: Set(false),
            publish_datetime: Set(None),
            base_release: Set(input.base_release),
            use_current_live_as_base_release: Set(input.use_current_live_as_base_release),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let model = model.insert(&self.db).await?;
        info!(release_id = %model.id, "created content release");
        release_from_model(model)
    }

    async fn find_release(&self, id: Uuid) -> StoreResult<Option<Release>> {
        match release::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(release_from_model(model)?)),
            None => Ok(None),
        }
    }

    async fn find_release_by_title_version(
        &self,
        site_code: &str,
        title: &str,
        version: &str,
    ) -> StoreResult<Vec<Release>> {
        let models = release::Entity::find()
            .filter(release::Column::SiteCode.eq(site_code))
            .filter(release::Column::Title.eq(title))
            .filter(release::Column::Version.eq(version))
            .all(&self.db)
            .await?;
        models.into_iter().map(release_from_model).collect()
    }

    async fn list_releases(
        &self,
        site_code: &str,
        status: Option<ReleaseStatus>,
        since: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<Release>> {
        let mut query = release::Entity::find().filter(release::Column::SiteCode.eq(site_code));
        if let Some(status) = status {
            query = query.filter(release::Column::Status.eq(status.as_i32()));
        }
        if let Some(since) = since {
            query = query.filter(release::Column::PublishDatetime.gt(since));
        }
        let models = query.all(&self.db).await?;
        models.into_iter().map(release_from_model).collect()
    }

    async fn find_live_release(&self, site_code: &str) -> StoreResult<Option<Release>> {
        let model = release::Entity::find()
            .filter(release::Column::SiteCode.eq(site_code))
            .filter(release::Column::IsLive.eq(true))
            .one(&self.db)
            .await?;
        match model {
            Some(model) => Ok(Some(release_from_model(model)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, title, version), fields(release_id = %id))]
    async fn update_release_title_version(
        &self,
        id: Uuid,
        title: Option<String>,
        version: Option<String>,
    ) -> StoreResult<Release> {
        let model = release::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::Domain(DomainError::ContentReleaseDoesNotExist))?;
        let mut active: release::ActiveModel = model.into();
        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(version) = version {
            active.version = Set(version);
        }
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&self.db).await?;
        release_from_model(model)
    }

    #[instrument(skip(self), fields(release_id = %id, status = ?status))]
    async fn update_release_status(
        &self,
        id: Uuid,
        status: ReleaseStatus,
        publish_datetime: Option<DateTime<Utc>>,
    ) -> StoreResult<Release> {
        let model = release::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::Domain(DomainError::ContentReleaseDoesNotExist))?;
        let mut active: release::ActiveModel = model.into();
        active.status = Set(status.as_i32());
        active.is_live = Set(status == ReleaseStatus::Live);
        active.publish_datetime = Set(publish_datetime.map(Into::into));
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&self.db).await?;
        info!(release_id = %id, status = status.name(), "release status updated");
        release_from_model(model)
    }

    #[instrument(skip(self), fields(site_code = %site_code, release_id = %id))]
    async fn promote_to_live(
        &self,
        site_code: &str,
        id: Uuid,
        publish_datetime: DateTime<Utc>,
    ) -> StoreResult<Release> {
        let txn = self.db.begin().await?;

        let currently_live = release::Entity::find()
            .filter(release::Column::SiteCode.eq(site_code))
            .filter(release::Column::IsLive.eq(true))
            .all(&txn)
            .await?;
        for model in currently_live {
            if model.id == id {
                continue;
            }
            let mut active: release::ActiveModel = model.into();
            active.is_live = Set(false);
            active.status = Set(ReleaseStatus::Archived.as_i32());
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await?;
        }

        let model = release::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(StoreError::Domain(DomainError::ContentReleaseDoesNotExist))?;
        let mut active: release::ActiveModel = model.into();
        active.is_live = Set(true);
        active.status = Set(ReleaseStatus::Live.as_i32());
        active.publish_datetime = Set(Some(publish_datetime.into()));
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&txn).await?;

        txn.commit().await?;
        info!(release_id = %id, "promoted release to live");
        release_from_model(model)
    }

    async fn delete_release(&self, id: Uuid) -> StoreResult<()> {
        release::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn upsert_release_parameter(&self, release_id: Uuid, key: &str, value: &str) -> StoreResult<()> {
        let existing = release_parameter::Entity::find()
            .filter(release_parameter::Column::ReleaseId.eq(release_id))
            .filter(release_parameter::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        match existing {
            Some(model) => {
                let mut active: release_parameter::ActiveModel = model.into();
                active.value = Set(value.to_string());
                active.update(&self.db).await?;
            }
            None => {
                let active = release_parameter::ActiveModel {
                    id: Set(generate_id()),
                    release_id: Set(release_id),
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                };
                active.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn get_release_parameter(&self, release_id: Uuid, key: &str) -> StoreResult<Option<String>> {
        let model = release_parameter::Entity::find()
            .filter(release_parameter::Column::ReleaseId.eq(release_id))
            .filter(release_parameter::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| m.value))
    }

    async fn list_release_parameters(&self, release_id: Uuid) -> StoreResult<Vec<ReleaseParameter>> {
        let models = release_parameter::Entity::find()
            .filter(release_parameter::Column::ReleaseId.eq(release_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(release_parameter_from_model).collect())
    }

    async fn clear_release_parameters(&self, release_id: Uuid) -> StoreResult<()> {
        release_parameter::Entity::delete_many()
            .filter(release_parameter::Column::ReleaseId.eq(release_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn find_releases_by_parameter(
        &self,
        site_code: &str,
        key: &str,
        value: &str,
    ) -> StoreResult<Vec<Release>> {
        let params = release_parameter::Entity::find()
            .filter(release_parameter::Column::Key.eq(key))
            .filter(release_parameter::Column::Value.eq(value))
            .all(&self.db)
            .await?;
        let release_ids: Vec<Uuid> = params.into_iter().map(|p| p.release_id).collect();
        if release_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = release::Entity::find()
            .filter(release::Column::SiteCode.eq(site_code))
            .filter(release::Column::Id.is_in(release_ids))
            .all(&self.db)
            .await?;
        models.into_iter().map(release_from_model).collect()
    }

    #[instrument(skip(self, doc), fields(release_id = %release_id, document_key = %doc.document_key))]
    async fn attach_document(
        &self,
        release_id: Uuid,
        doc: NewReleaseDocument,
    ) -> StoreResult<ReleaseDocument> {
        let existing = release_document::Entity::find()
            .filter(release_document::Column::ReleaseId.eq(release_id))
            .filter(release_document::Column::DocumentKey.eq(doc.document_key.clone()))
            .filter(release_document::Column::ContentType.eq(doc.content_type.clone()))
            .one(&self.db)
            .await?;
        let json = doc
            .document_json
            .as_deref()
            .map(serde_json::from_str::<sea_orm::JsonValue>)
            .transpose()
            .map_err(|e| StoreError::Domain(DomainError::Store(relstore_core::StoreErrorSource(e.to_string()))))?;
        let now = Utc::now();
        let model = match existing {
            Some(model) => {
                let mut active: release_document::ActiveModel = model.into();
                active.document_json = Set(json);
                active.deleted = Set(false);
                active.updated_at = Set(now.into());
                active.update(&self.db).await?
            }
            None => {
                let active = release_document::ActiveModel {
                    id: Set(generate_id()),
                    release_id: Set(release_id),
                    document_key: Set(doc.document_key),
                    content_type: Set(doc.content_type),
                    document_json: Set(json),
                    deleted: Set(false),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                active.insert(&self.db).await?
            }
        };
        info!(release_document_id = %model.id, "attached document to release");
        Ok(release_document_from_model(model, Vec::new()))
    }

    async fn tombstone_document(
        &self,
        release_id: Uuid,
        identity: &DocumentIdentity,
    ) -> StoreResult<ReleaseDocument> {
        let existing = release_document::Entity::find()
            .filter(release_document::Column::ReleaseId.eq(release_id))
            .filter(release_document::Column::DocumentKey.eq(identity.document_key.clone()))
            .filter(release_document::Column::ContentType.eq(identity.content_type.clone()))
            .one(&self.db)
            .await?;
        let now = Utc::now();
        let model = match existing {
            Some(model) => {
                let mut active: release_document::ActiveModel = model.into();
                active.deleted = Set(true);
                active.document_json = Set(None);
                active.updated_at = Set(now.into());
                active.update(&self.db).await?
            }
            None => {
                let active = release_document::ActiveModel {
                    id: Set(generate_id()),
                    release_id: Set(release_id),
                    document_key: Set(identity.document_key.clone()),
                    content_type: Set(identity.content_type.clone()),
                    document_json: Set(None),
                    deleted: Set(true),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                active.insert(&self.db).await?
            }
        };
        Ok(release_document_from_model(model, Vec::new()))
    }

    async fn remove_document(&self, release_id: Uuid, identity: &DocumentIdentity) -> StoreResult<()> {
        let models = release_document::Entity::find()
            .filter(release_document::Column::ReleaseId.eq(release_id))
            .all(&self.db)
            .await?;
        for model in models {
            if identity_matches(&model, identity) {
                release_document::Entity::delete_by_id(model.id)
                    .exec(&self.db)
                    .await?;
            }
        }
        Ok(())
    }

    async fn find_document(
        &self,
        release_id: Uuid,
        identity: &DocumentIdentity,
    ) -> StoreResult<Option<ReleaseDocument>> {
        let model = release_document::Entity::find()
            .filter(release_document::Column::ReleaseId.eq(release_id))
            .filter(release_document::Column::DocumentKey.eq(identity.document_key.clone()))
            .filter(release_document::Column::ContentType.eq(identity.content_type.clone()))
            .one(&self.db)
            .await?;
        match model {
            Some(model) => {
                let params = document_parameter::Entity::find()
                    .filter(document_parameter::Column::ReleaseDocumentId.eq(model.id))
                    .all(&self.db)
                    .await?;
                Ok(Some(release_document_from_model(model, params)))
            }
            None => Ok(None),
        }
    }

    async fn list_documents(&self, release_id: Uuid) -> StoreResult<Vec<ReleaseDocument>> {
        let models = release_document::Entity::find()
            .filter(release_document::Column::ReleaseId.eq(release_id))
            .all(&self.db)
            .await?;
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let all_params = document_parameter::Entity::find()
            .filter(document_parameter::Column::ReleaseDocumentId.is_in(ids))
            .all(&self.db)
            .await?;
        let mut by_doc: HashMap<Uuid, Vec<document_parameter::Model>> = HashMap::new();
        for p in all_params {
            by_doc.entry(p.release_document_id).or_default().push(p);
        }
        Ok(models
            .into_iter()
            .map(|model| {
                let params = by_doc.remove(&model.id).unwrap_or_default();
                release_document_from_model(model, params)
            })
            .collect())
    }

    async fn upsert_document_parameter(
        &self,
        release_document_id: Uuid,
        key: &str,
        value: &str,
    ) -> StoreResult<()> {
        let existing = document_parameter::Entity::find()
            .filter(document_parameter::Column::ReleaseDocumentId.eq(release_document_id))
            .filter(document_parameter::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        match existing {
            Some(model) => {
                let mut active: document_parameter::ActiveModel = model.into();
                active.value = Set(value.to_string());
                active.update(&self.db).await?;
            }
            None => {
                let active = document_parameter::ActiveModel {
                    id: Set(generate_id()),
                    release_document_id: Set(release_document_id),
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                };
                active.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    async fn get_document_parameter(
        &self,
        release_document_id: Uuid,
        key: &str,
    ) -> StoreResult<Option<String>> {
        let model = document_parameter::Entity::find()
            .filter(document_parameter::Column::ReleaseDocumentId.eq(release_document_id))
            .filter(document_parameter::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| m.value))
    }
}

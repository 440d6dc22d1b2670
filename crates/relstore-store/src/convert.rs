use std::collections::BTreeMap;

use relstore_core::{DocumentIdentity, Release, ReleaseDocument, ReleaseParameter, ReleaseStatus};

use crate::entities::{document_parameter, release, release_document, release_parameter};
use crate::error::{StoreError, StoreResult};

pub fn release_from_model(model: release::Model) -> StoreResult<Release> {
    let status = ReleaseStatus::from_i32(model.status).ok_or_else(|| {
        StoreError::Domain(relstore_core::Error::Store(relstore_core::StoreErrorSource(
            format!("unrecognized release status discriminant {}", model.status),
        )))
    })?;
    Ok(Release {
        uuid: model.id,
        site_code: model.site_code,
        title: model.title,
        version: model.version,
        status,
        is_live: model.is_live,
        publish_datetime: model.publish_datetime.map(|dt| dt.with_timezone(&chrono::Utc)),
        base_release: model.base_release,
        use_current_live_as_base_release: model.use_current_live_as_base_release,
    })
}

pub fn release_parameter_from_model(model: release_parameter::Model) -> ReleaseParameter {
    ReleaseParameter {
        key: model.key,
        value: model.value,
    }
}

pub fn release_document_from_model(
    model: release_document::Model,
    parameters: Vec<document_parameter::Model>,
) -> ReleaseDocument {
    let parameters: BTreeMap<String, String> =
        parameters.into_iter().map(|p| (p.key, p.value)).collect();
    ReleaseDocument {
        id: model.id,
        document_key: model.document_key,
        content_type: model.content_type,
        document_json: model.document_json.map(|v| v.to_string()),
        deleted: model.deleted,
        parameters,
    }
}

pub fn identity_matches(model: &release_document::Model, identity: &DocumentIdentity) -> bool {
    model.document_key == identity.document_key && model.content_type == identity.content_type
}

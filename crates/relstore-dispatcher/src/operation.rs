use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use relstore_core::{DocumentIdentity, ReleaseStatus};
use uuid::Uuid;

/// Every operation the dispatcher understands (spec §4.8's enumeration).
/// One variant per operation, carrying exactly the inputs that operation
/// needs.
#[derive(Debug, Clone)]
pub enum Operation {
    AddContentRelease {
        site_code: String,
        title: String,
        version: String,
        base_release: Option<Uuid>,
        use_current_live_as_base_release: bool,
    },
    RemoveContentRelease {
        id: Uuid,
    },
    UpdateContentRelease {
        id: Uuid,
        title: Option<String>,
        version: Option<String>,
    },
    UpdateContentReleaseParameters {
        id: Uuid,
        parameters: BTreeMap<String, String>,
        clear_first: bool,
    },
    GetContentReleaseDetails {
        id: Uuid,
    },
    GetContentReleaseDetailsQueryParameters {
        site_code: String,
        parameters: BTreeMap<String, String>,
    },
    SetStageContentRelease {
        id: Uuid,
    },
    SetLiveContentRelease {
        id: Uuid,
    },
    FreezeContentRelease {
        id: Uuid,
        publish_datetime: DateTime<Utc>,
    },
    UnfreezeContentRelease {
        id: Uuid,
    },
    ArchiveContentRelease {
        id: Uuid,
    },
    UnarchiveContentRelease {
        id: Uuid,
    },
    GetLiveContentRelease {
        site_code: String,
    },
    ListContentReleases {
        site_code: String,
        status: Option<ReleaseStatus>,
        since: Option<DateTime<Utc>>,
    },
    PublishDocumentToContentRelease {
        release_id: Uuid,
        document_key: String,
        content_type: String,
        document_json: String,
        parameters: BTreeMap<String, String>,
    },
    UnpublishDocumentFromContentRelease {
        release_id: Uuid,
        identity: DocumentIdentity,
    },
    DeleteDocumentFromContentRelease {
        release_id: Uuid,
        identity: DocumentIdentity,
    },
    GetDocumentFromContentRelease {
        release_id: Uuid,
        identity: DocumentIdentity,
    },
    GetDocumentExtraFromContentRelease {
        release_id: Uuid,
        identity: DocumentIdentity,
        key: String,
    },
    GetExtraParamater {
        release_id: Uuid,
        key: String,
    },
    GetExtraParamaters {
        release_id: Uuid,
    },
    CompareContentReleases {
        from_release_id: Uuid,
        to_release_id: Uuid,
    },
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Release lifecycle status (spec §3, §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReleaseStatus {
    Preview = 0,
    Freeze = 1,
    Live = 2,
    Archived = 3,
}

impl ReleaseStatus {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Preview),
            1 => Some(Self::Freeze),
            2 => Some(Self::Live),
            3 => Some(Self::Archived),
            _ => None,
        }
    }

    /// Textual name used in JSON-mode responses (spec §6).
    pub fn name(self) -> &'static str {
        match self {
            Self::Preview => "PREVIEW",
            Self::Freeze => "FREEZE",
            Self::Live => "LIVE",
            Self::Archived => "ARCHIVED",
        }
    }
}

/// A named version of a content snapshot within a site (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub uuid: Uuid,
    pub site_code: String,
    pub title: String,
    pub version: String,
    pub status: ReleaseStatus,
    pub is_live: bool,
    pub publish_datetime: Option<DateTime<Utc>>,
    pub base_release: Option<Uuid>,
    pub use_current_live_as_base_release: bool,
}

impl Release {
    pub fn is_published(&self) -> bool {
        self.publish_datetime.is_some()
    }
}

/// A release-level key/value parameter (spec §3), distinct from the
/// per-document parameters carried on [`ReleaseDocument`]. Used by the
/// parameter index (spec §4.7) to look releases up by parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseParameter {
    pub key: String,
    pub value: String,
}

/// Default content type tag (spec §3).
pub const DEFAULT_CONTENT_TYPE: &str = "content";

/// The identity a document is addressed by within a release: its key and
/// content-type tag (spec §3, §4.4, §4.6).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentIdentity {
    pub document_key: String,
    pub content_type: String,
}

impl DocumentIdentity {
    pub fn new(document_key: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            document_key: document_key.into(),
            content_type: content_type.into(),
        }
    }
}

/// A document attached to one or more releases (spec §3).
///
/// `deleted = true` means this attachment is a tombstone: it masks a
/// same-key document inherited from a base release and carries no content
/// (spec §4.4 invariant 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDocument {
    pub id: Uuid,
    pub document_key: String,
    pub content_type: String,
    pub document_json: Option<String>,
    pub deleted: bool,
    pub parameters: BTreeMap<String, String>,
}

impl ReleaseDocument {
    pub fn identity(&self) -> DocumentIdentity {
        DocumentIdentity::new(self.document_key.clone(), self.content_type.clone())
    }
}

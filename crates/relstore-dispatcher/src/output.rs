use serde::{Deserialize, Serialize};
use serde_json::Value;

use relstore_core::{Release, ReleaseDocument, ReleaseParameter};
use relstore_release::DiffEntry;

use crate::error::DispatchError;

/// Selects how [`crate::Dispatcher`] shapes its return value: as the
/// native Rust type (spec §4.8's "native mode"), or as a `serde_json::Value`
/// for callers crossing a process boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Native,
    Json,
}

impl OutputMode {
    pub fn parse(s: &str) -> Result<Self, DispatchError> {
        match s {
            "native" => Ok(Self::Native),
            "json" => Ok(Self::Json),
            other => Err(DispatchError::UnknownOutputMode(other.to_string())),
        }
    }
}

/// The dispatcher's return value, already shaped per the requested
/// [`OutputMode`].
#[derive(Debug, Clone)]
pub enum DispatchOutput {
    Release(Release),
    Releases(Vec<Release>),
    Document(ReleaseDocument),
    Documents(Vec<ReleaseDocument>),
    Parameter(String),
    Parameters(Vec<ReleaseParameter>),
    Diff(Vec<DiffEntry>),
    Unit,
}

impl DispatchOutput {
    /// Renders this value as JSON regardless of how it was produced —
    /// used when the caller asked for [`OutputMode::Json`].
    pub fn into_json(self) -> Value {
        match self {
            DispatchOutput::Release(r) => serde_json::to_value(r),
            DispatchOutput::Releases(r) => serde_json::to_value(r),
            DispatchOutput::Document(d) => serde_json::to_value(d),
            DispatchOutput::Documents(d) => serde_json::to_value(d),
            DispatchOutput::Parameter(p) => serde_json::to_value(p),
            DispatchOutput::Parameters(p) => serde_json::to_value(p),
            DispatchOutput::Diff(d) => serde_json::to_value(d),
            DispatchOutput::Unit => Ok(Value::Null),
        }
        .unwrap_or(Value::Null)
    }
}

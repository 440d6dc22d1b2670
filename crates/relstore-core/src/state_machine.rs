//! Release status transitions (spec §4.2).
//!
//! Unlike a typestate machine with one Rust type per state, a `Release`'s
//! status cycles (LIVE ⇄ ARCHIVED, PREVIEW ⇄ FREEZE), so transitions are
//! modeled as validated, runtime state changes on [`ReleaseStatus`] rather
//! than distinct generic types — see `rustok-content::state_machine` for
//! the typestate style this deliberately departs from, and why it doesn't
//! fit a graph with cycles.
//!
//! These functions validate local preconditions only; they do not touch
//! the store. The "exactly one live release per site" invariant requires
//! a cross-row transaction and lives in `relstore-release`'s promotion
//! flow (spec §4.2 steps 1-3).

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::ReleaseStatus;

/// `freeze`: PREVIEW → FREEZE, scheduling `publish_datetime` in the future.
pub fn freeze(current: ReleaseStatus, publish_datetime: DateTime<Utc>, now: DateTime<Utc>) -> Result<ReleaseStatus> {
    if current != ReleaseStatus::Preview {
        return Err(Error::ContentReleasePublish);
    }
    if publish_datetime <= now {
        return Err(Error::PublishDatetimeInPast);
    }
    tracing::info!(from = ?current, to = "FREEZE", "release transition: freeze");
    Ok(ReleaseStatus::Freeze)
}

/// `unfreeze`: FREEZE → PREVIEW, only while not yet published.
pub fn unfreeze(current: ReleaseStatus, publish_datetime: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<ReleaseStatus> {
    if current != ReleaseStatus::Freeze {
        return Err(Error::ContentReleasePublish);
    }
    if let Some(pd) = publish_datetime {
        if pd <= now {
            return Err(Error::ContentReleasePublish);
        }
    }
    tracing::info!(from = ?current, to = "PREVIEW", "release transition: unfreeze");
    Ok(ReleaseStatus::Preview)
}

/// `set_stage`: PREVIEW → FREEZE with no scheduling, immediately followed
/// by `set_live` (spec §4.2).
pub fn set_stage(current: ReleaseStatus) -> Result<ReleaseStatus> {
    if current != ReleaseStatus::Preview {
        return Err(Error::ContentReleasePublish);
    }
    tracing::info!(from = ?current, to = "FREEZE", "release transition: set_stage");
    Ok(ReleaseStatus::Freeze)
}

/// The target-release half of `set_live`: PREVIEW/FREEZE → LIVE. The
/// caller is responsible for clearing the previously-live release under
/// the same transaction (spec §4.2 step 1).
pub fn set_live(current: ReleaseStatus) -> Result<ReleaseStatus> {
    match current {
        ReleaseStatus::Preview | ReleaseStatus::Freeze => {
            tracing::info!(from = ?current, to = "LIVE", "release transition: set_live");
            Ok(ReleaseStatus::Live)
        }
        ReleaseStatus::Live | ReleaseStatus::Archived => Err(Error::ContentReleasePublish),
    }
}

/// `archive`: requires the release to have been published at some point in
/// the past (spec §4.2's "previously published" precondition, resolved
/// against the original implementation's commented-out test contract).
pub fn archive(publish_datetime: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<ReleaseStatus> {
    match publish_datetime {
        Some(pd) if pd <= now => {
            tracing::info!(to = "ARCHIVED", "release transition: archive");
            Ok(ReleaseStatus::Archived)
        }
        _ => Err(Error::ContentReleaseNotPublish),
    }
}

/// `unarchive`: ARCHIVED → LIVE, same "previously published" precondition
/// as `archive`.
pub fn unarchive(current: ReleaseStatus, publish_datetime: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<ReleaseStatus> {
    if current != ReleaseStatus::Archived {
        return Err(Error::ContentReleaseNotPublish);
    }
    match publish_datetime {
        Some(pd) if pd <= now => {
            tracing::info!(from = ?current, to = "LIVE", "release transition: unarchive");
            Ok(ReleaseStatus::Live)
        }
        _ => Err(Error::ContentReleaseNotPublish),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn freeze_requires_future_publish_datetime() {
        let now = now();
        assert_eq!(
            freeze(ReleaseStatus::Preview, now - Duration::minutes(10), now),
            Err(Error::PublishDatetimeInPast)
        );
        assert_eq!(
            freeze(ReleaseStatus::Preview, now + Duration::minutes(10), now),
            Ok(ReleaseStatus::Freeze)
        );
    }

    #[test]
    fn unfreeze_rejects_already_published() {
        let now = now();
        assert_eq!(
            unfreeze(ReleaseStatus::Freeze, Some(now - Duration::minutes(10)), now),
            Err(Error::ContentReleasePublish)
        );
        assert_eq!(
            unfreeze(ReleaseStatus::Freeze, None, now),
            Ok(ReleaseStatus::Preview)
        );
        assert_eq!(
            unfreeze(ReleaseStatus::Freeze, Some(now + Duration::minutes(10)), now),
            Ok(ReleaseStatus::Preview)
        );
    }

    #[test]
    fn set_live_only_from_preview_or_freeze() {
        assert_eq!(set_live(ReleaseStatus::Preview), Ok(ReleaseStatus::Live));
        assert_eq!(set_live(ReleaseStatus::Freeze), Ok(ReleaseStatus::Live));
        assert_eq!(set_live(ReleaseStatus::Live), Err(Error::ContentReleasePublish));
        assert_eq!(set_live(ReleaseStatus::Archived), Err(Error::ContentReleasePublish));
    }

    #[test]
    fn archive_requires_past_publish_datetime() {
        let now = now();
        assert_eq!(archive(None, now), Err(Error::ContentReleaseNotPublish));
        assert_eq!(
            archive(Some(now + Duration::minutes(10)), now),
            Err(Error::ContentReleaseNotPublish)
        );
        assert_eq!(archive(Some(now - Duration::minutes(10)), now), Ok(ReleaseStatus::Archived));
    }

    #[test]
    fn unarchive_requires_archived_and_past_publish_datetime() {
        let now = now();
        assert_eq!(
            unarchive(ReleaseStatus::Preview, Some(now - Duration::minutes(10)), now),
            Err(Error::ContentReleaseNotPublish)
        );
        assert_eq!(
            unarchive(ReleaseStatus::Archived, Some(now - Duration::minutes(10)), now),
            Ok(ReleaseStatus::Live)
        );
    }
}

//! Baseline chain resolution (spec §4.3).
//!
//! Walked iteratively with an explicit visited set rather than recursively:
//! a self-referential or circular `base_release` chain must fail with
//! [`relstore_core::Error::ReleaseChainCycle`] instead of overflowing the
//! stack.

use std::collections::HashSet;

use relstore_core::{Error, Release, ReleaseStatus, Result};
use relstore_store::Store;

/// Hard ceiling on chain length, independent of cycle detection — a
/// legitimate but absurdly long chain shouldn't be walked forever either.
const MAX_CHAIN_DEPTH: usize = 256;

/// Resolves `release_id`'s base chain, nearest ancestor first. The release
/// itself is included as the first element. Traversal stops at — but still
/// includes — the first release whose `base_release` is null or whose
/// `status` is ARCHIVED; ancestors beyond an archived release are out of
/// scope for the effective view (spec §4.3).
pub async fn resolve_chain(store: &dyn Store, release_id: uuid::Uuid) -> Result<Vec<Release>> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = release_id;

    loop {
        if !visited.insert(current) {
            return Err(Error::ReleaseChainCycle);
        }
        if chain.len() >= MAX_CHAIN_DEPTH {
            return Err(Error::ReleaseChainCycle);
        }

        let release = store
            .find_release(current)
            .await?
            .ok_or(Error::BaseContentReleaseDoesNotExist)?;

        let next = if release.status == ReleaseStatus::Archived {
            None
        } else {
            release.base_release
        };
        chain.push(release);

        match next {
            Some(base_id) => current = base_id,
            None => break,
        }
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use relstore_core::{DocumentIdentity, ReleaseDocument, ReleaseParameter, ReleaseStatus};
    use relstore_store::{NewRelease, NewReleaseDocument, StoreResult};
    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct FakeStore {
        releases: Mutex<HashMap<Uuid, Release>>,
    }

    impl FakeStore {
        fn insert(&self, release: Release) {
            self.releases.lock().unwrap().insert(release.uuid, release);
        }
    }

    fn release(uuid: Uuid, base_release: Option<Uuid>) -> Release {
        release_with_status(uuid, base_release, ReleaseStatus::Preview)
    }

    fn release_with_status(uuid: Uuid, base_release: Option<Uuid>, status: ReleaseStatus) -> Release {
        Release {
            uuid,
            site_code: "site".into(),
            title: "t".into(),
            version: "v".into(),
            status,
            is_live: false,
            publish_datetime: None,
            base_release,
            use_current_live_as_base_release: false,
        }
    }

    #[async_trait]
    impl Store for FakeStore {
        async fn create_release(&self, _input: NewRelease) -> StoreResult<Release> {
            unimplemented!()
        }
        async fn find_release(&self, id: Uuid) -> StoreResult<Option<Release>> {
            Ok(self.releases.lock().unwrap().get(&id).cloned())
        }
        async fn find_release_by_title_version(
            &self,
            _site_code: &str,
            _title: &str,
            _version: &str,
        ) -> StoreResult<Vec<Release>> {
            Ok(Vec::new())
        }
        async fn list_releases(
            &self,
            _site_code: &str,
            _status: Option<ReleaseStatus>,
            _since: Option<chrono::DateTime<Utc>>,
        ) -> StoreResult<Vec<Release>> {
            Ok(Vec::new())
        }
        async fn find_live_release(&self, _site_code: &str) -> StoreResult<Option<Release>> {
            Ok(None)
        }
        async fn update_release_title_version(
            &self,
            _id: Uuid,
            _title: Option<String>,
            _version: Option<String>,
        ) -> StoreResult<Release> {
            unimplemented!()
        }
        async fn update_release_status(
            &self,
            _id: Uuid,
            _status: ReleaseStatus,
            _publish_datetime: Option<chrono::DateTime<Utc>>,
        ) -> StoreResult<Release> {
            unimplemented!()
        }
        async fn promote_to_live(
            &self,
            _site_code: &str,
            _id: Uuid,
            _publish_datetime: chrono::DateTime<Utc>,
        ) -> StoreResult<Release> {
            unimplemented!()
        }
        async fn delete_release(&self, _id: Uuid) -> StoreResult<()> {
            Ok(())
        }
        async fn upsert_release_parameter(&self, _release_id: Uuid, _key: &str, _value: &str) -> StoreResult<()> {
            Ok(())
        }
        async fn get_release_parameter(&self, _release_id: Uuid, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }
        async fn list_release_parameters(&self, _release_id: Uuid) -> StoreResult<Vec<ReleaseParameter>> {
            Ok(Vec::new())
        }
        async fn clear_release_parameters(&self, _release_id: Uuid) -> StoreResult<()> {
            Ok(())
        }
        async fn find_releases_by_parameter(
            &self,
            _site_code: &str,
            _key: &str,
            _value: &str,
        ) -> StoreResult<Vec<Release>> {
            Ok(Vec::new())
        }
        async fn attach_document(
            &self,
            _release_id: Uuid,
            _doc: NewReleaseDocument,
        ) -> StoreResult<ReleaseDocument> {
            unimplemented!()
        }
        async fn tombstone_document(
            &self,
            _release_id: Uuid,
            _identity: &DocumentIdentity,
        ) -> StoreResult<ReleaseDocument> {
            unimplemented!()
        }
        async fn remove_document(&self, _release_id: Uuid, _identity: &DocumentIdentity) -> StoreResult<()> {
            Ok(())
        }
        async fn find_document(
            &self,
            _release_id: Uuid,
            _identity: &DocumentIdentity,
        ) -> StoreResult<Option<ReleaseDocument>> {
            Ok(None)
        }
        async fn list_documents(&self, _release_id: Uuid) -> StoreResult<Vec<ReleaseDocument>> {
            Ok(Vec::new())
        }
        async fn upsert_document_parameter(
            &self,
            _release_document_id: Uuid,
            _key: &str,
            _value: &str,
        ) -> StoreResult<()> {
            Ok(())
        }
        async fn get_document_parameter(
            &self,
            _release_document_id: Uuid,
            _key: &str,
        ) -> StoreResult<Option<String>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn resolves_a_straight_chain() {
        let store = FakeStore::default();
        let grandparent = Uuid::new_v4();
        let parent = Uuid::new_v4();
        let child = Uuid::new_v4();
        store.insert(release(grandparent, None));
        store.insert(release(parent, Some(grandparent)));
        store.insert(release(child, Some(parent)));

        let chain = resolve_chain(&store, child).await.unwrap();
        let ids: Vec<Uuid> = chain.iter().map(|r| r.uuid).collect();
        assert_eq!(ids, vec![child, parent, grandparent]);
    }

    #[tokio::test]
    async fn detects_a_cycle() {
        let store = FakeStore::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.insert(release(a, Some(b)));
        store.insert(release(b, Some(a)));

        let err = resolve_chain(&store, a).await.unwrap_err();
        assert_eq!(err, Error::ReleaseChainCycle);
    }

    #[tokio::test]
    async fn stops_at_an_archived_release_without_following_its_base() {
        let store = FakeStore::default();
        let great_grandparent = Uuid::new_v4();
        let grandparent = Uuid::new_v4();
        let parent = Uuid::new_v4();
        let child = Uuid::new_v4();
        store.insert(release(great_grandparent, None));
        store.insert(release_with_status(
            grandparent,
            Some(great_grandparent),
            ReleaseStatus::Archived,
        ));
        store.insert(release(parent, Some(grandparent)));
        store.insert(release(child, Some(parent)));

        let chain = resolve_chain(&store, child).await.unwrap();
        let ids: Vec<Uuid> = chain.iter().map(|r| r.uuid).collect();
        assert_eq!(ids, vec![child, parent, grandparent]);
    }

    #[tokio::test]
    async fn missing_base_release_is_an_error() {
        let store = FakeStore::default();
        let child = Uuid::new_v4();
        store.insert(release(child, Some(Uuid::new_v4())));

        let err = resolve_chain(&store, child).await.unwrap_err();
        assert_eq!(err, Error::BaseContentReleaseDoesNotExist);
    }
}

use relstore_core::{DocumentIdentity, ReleaseStatus};
use relstore_store::{Migrator, NewRelease, NewReleaseDocument, SeaOrmStore, Store};

async fn test_store() -> SeaOrmStore {
    let db = relstore_test_utils::setup_test_db::<Migrator>().await;
    SeaOrmStore::new(db)
}

#[tokio::test]
async fn create_and_find_release_round_trips() {
    let store = test_store().await;
    let created = store
        .create_release(NewRelease {
            site_code: "site-a".into(),
            title: "Spring launch".into(),
            version: "v1".into(),
            base_release: None,
            use_current_live_as_base_release: false,
        })
        .await
        .unwrap();

    assert_eq!(created.status, ReleaseStatus::Preview);
    assert!(!created.is_live);

    let found = store.find_release(created.uuid).await.unwrap().unwrap();
    assert_eq!(found.title, "Spring launch");
    assert_eq!(found.version, "v1");
}

#[tokio::test]
async fn promote_to_live_demotes_previous_live_release() {
    let store = test_store().await;
    let first = store
        .create_release(NewRelease {
            site_code: "site-b".into(),
            title: "First".into(),
            version: "v1".into(),
            base_release: None,
            use_current_live_as_base_release: false,
        })
        .await
        .unwrap();
    let second = store
        .create_release(NewRelease {
            site_code: "site-b".into(),
            title: "Second".into(),
            version: "v2".into(),
            base_release: None,
            use_current_live_as_base_release: false,
        })
        .await
        .unwrap();

    let now = chrono::Utc::now();
    store.promote_to_live("site-b", first.uuid, now).await.unwrap();
    let promoted = store.promote_to_live("site-b", second.uuid, now).await.unwrap();

    assert!(promoted.is_live);
    let previous = store.find_release(first.uuid).await.unwrap().unwrap();
    assert!(!previous.is_live);

    let live = store.find_live_release("site-b").await.unwrap().unwrap();
    assert_eq!(live.uuid, second.uuid);
}

#[tokio::test]
async fn attach_and_tombstone_document() {
    let store = test_store().await;
    let release = store
        .create_release(NewRelease {
            site_code: "site-c".into(),
            title: "Docs".into(),
            version: "v1".into(),
            base_release: None,
            use_current_live_as_base_release: false,
        })
        .await
        .unwrap();

    let doc = store
        .attach_document(
            release.uuid,
            NewReleaseDocument {
                document_key: "home".into(),
                content_type: "content".into(),
                document_json: Some(r#"{"title":"Home"}"#.into()),
            },
        )
        .await
        .unwrap();
    assert!(!doc.deleted);

    let identity = DocumentIdentity::new("home", "content");
    let tombstoned = store.tombstone_document(release.uuid, &identity).await.unwrap();
    assert!(tombstoned.deleted);
    assert!(tombstoned.document_json.is_none());

    let fetched = store.find_document(release.uuid, &identity).await.unwrap().unwrap();
    assert!(fetched.deleted);
}

#[tokio::test]
async fn release_parameters_round_trip() {
    let store = test_store().await;
    let release = store
        .create_release(NewRelease {
            site_code: "site-d".into(),
            title: "Params".into(),
            version: "v1".into(),
            base_release: None,
            use_current_live_as_base_release: false,
        })
        .await
        .unwrap();

    store
        .upsert_release_parameter(release.uuid, "region", "eu")
        .await
        .unwrap();
    assert_eq!(
        store.get_release_parameter(release.uuid, "region").await.unwrap(),
        Some("eu".to_string())
    );

    store
        .upsert_release_parameter(release.uuid, "region", "apac")
        .await
        .unwrap();
    assert_eq!(
        store.get_release_parameter(release.uuid, "region").await.unwrap(),
        Some("apac".to_string())
    );

    let matches = store
        .find_releases_by_parameter("site-d", "region", "apac")
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].uuid, release.uuid);
}

#[tokio::test]
async fn clear_release_parameters_removes_all_existing_keys() {
    let store = test_store().await;
    let release = store
        .create_release(NewRelease {
            site_code: "site-e".into(),
            title: "Clear".into(),
            version: "v1".into(),
            base_release: None,
            use_current_live_as_base_release: false,
        })
        .await
        .unwrap();

    store.upsert_release_parameter(release.uuid, "region", "eu").await.unwrap();
    store.upsert_release_parameter(release.uuid, "tier", "gold").await.unwrap();
    assert_eq!(store.list_release_parameters(release.uuid).await.unwrap().len(), 2);

    store.clear_release_parameters(release.uuid).await.unwrap();
    assert!(store.list_release_parameters(release.uuid).await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_document_severs_a_release_specific_link() {
    let store = test_store().await;
    let release = store
        .create_release(NewRelease {
            site_code: "site-f".into(),
            title: "Remove".into(),
            version: "v1".into(),
            base_release: None,
            use_current_live_as_base_release: false,
        })
        .await
        .unwrap();

    store
        .attach_document(
            release.uuid,
            NewReleaseDocument {
                document_key: "home".into(),
                content_type: "content".into(),
                document_json: Some(r#"{"title":"Home"}"#.into()),
            },
        )
        .await
        .unwrap();

    let identity = DocumentIdentity::new("home", "content");
    assert!(store.find_document(release.uuid, &identity).await.unwrap().is_some());

    store.remove_document(release.uuid, &identity).await.unwrap();
    assert!(store.find_document(release.uuid, &identity).await.unwrap().is_none());
}

//! Diff engine: classify documents as Added, Changed, or Removed between
//! two document sets (spec §4.6).
//!
//! Output order is fixed: all Added entries, then all Changed, then all
//! Removed; each group sorted reverse-lexicographically by
//! [`DocumentIdentity`]. Callers compare whatever two document sets they
//! like — typically two releases' effective views.

use std::collections::BTreeMap;

use relstore_core::{DocumentIdentity, ReleaseDocument};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffKind {
    Added,
    Changed,
    Removed,
}

/// Parameters attached to a diff entry (spec §4.6 step 3): Added/Removed
/// carry a single map, Changed carries both sides so a caller can see what
/// moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffParameters {
    Single(BTreeMap<String, String>),
    Changed {
        release_from: BTreeMap<String, String>,
        release_compare_to: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub document_key: String,
    pub content_type: String,
    pub kind: DiffKind,
    pub parameters: Option<DiffParameters>,
}

fn non_empty(map: &BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(map.clone())
    }
}

/// Diffs `from` against `to`: documents present in `to` but not `from` are
/// Added, present in both with a differing `document_json` are Changed,
/// present in `from` but not `to` are Removed. Identical blobs produce no
/// record, even if their parameters differ.
pub fn diff(from: &[ReleaseDocument], to: &[ReleaseDocument]) -> Vec<DiffEntry> {
    let from_map: BTreeMap<DocumentIdentity, &ReleaseDocument> =
        from.iter().map(|d| (d.identity(), d)).collect();
    let to_map: BTreeMap<DocumentIdentity, &ReleaseDocument> =
        to.iter().map(|d| (d.identity(), d)).collect();

    let mut added: Vec<(DocumentIdentity, Option<DiffParameters>)> = Vec::new();
    let mut changed: Vec<(DocumentIdentity, Option<DiffParameters>)> = Vec::new();
    let mut removed: Vec<(DocumentIdentity, Option<DiffParameters>)> = Vec::new();

    for (identity, doc) in &to_map {
        match from_map.get(identity) {
            None => {
                added.push((identity.clone(), non_empty(&doc.parameters).map(DiffParameters::Single)));
            }
            Some(prior) => {
                if prior.document_json != doc.document_json {
                    let parameters = if prior.parameters.is_empty() && doc.parameters.is_empty() {
                        None
                    } else {
                        Some(DiffParameters::Changed {
                            release_from: prior.parameters.clone(),
                            release_compare_to: doc.parameters.clone(),
                        })
                    };
                    changed.push((identity.clone(), parameters));
                }
            }
        }
    }
    for (identity, doc) in &from_map {
        if !to_map.contains_key(identity) {
            removed.push((identity.clone(), non_empty(&doc.parameters).map(DiffParameters::Single)));
        }
    }

    // Reverse-lexicographic within each group.
    added.sort_by(|a, b| b.0.cmp(&a.0));
    changed.sort_by(|a, b| b.0.cmp(&a.0));
    removed.sort_by(|a, b| b.0.cmp(&a.0));

    let to_entry = |(identity, parameters): (DocumentIdentity, Option<DiffParameters>), kind: DiffKind| DiffEntry {
        document_key: identity.document_key,
        content_type: identity.content_type,
        kind,
        parameters,
    };

    let mut entries = Vec::with_capacity(added.len() + changed.len() + removed.len());
    entries.extend(added.into_iter().map(|e| to_entry(e, DiffKind::Added)));
    entries.extend(changed.into_iter().map(|e| to_entry(e, DiffKind::Changed)));
    entries.extend(removed.into_iter().map(|e| to_entry(e, DiffKind::Removed)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(key: &str, json: &str) -> ReleaseDocument {
        ReleaseDocument {
            id: uuid::Uuid::new_v4(),
            document_key: key.into(),
            content_type: "content".into(),
            document_json: Some(json.into()),
            deleted: false,
            parameters: Default::default(),
        }
    }

    #[test]
    fn classifies_added_changed_removed() {
        let from = vec![doc("a", "1"), doc("b", "1")];
        let to = vec![doc("a", "1"), doc("b", "2"), doc("c", "1")];

        let entries = diff(&from, &to);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, DiffKind::Added);
        assert_eq!(entries[0].document_key, "c");
        assert_eq!(entries[1].kind, DiffKind::Changed);
        assert_eq!(entries[1].document_key, "b");
    }

    #[test]
    fn groups_are_ordered_added_changed_removed_each_reverse_lexicographic() {
        let from = vec![doc("m", "1"), doc("z", "1")];
        let to = vec![doc("a", "1"), doc("b", "1"), doc("m", "2")];

        let entries = diff(&from, &to);
        let kinds_and_keys: Vec<(DiffKind, &str)> = entries
            .iter()
            .map(|e| (e.kind, e.document_key.as_str()))
            .collect();
        assert_eq!(
            kinds_and_keys,
            vec![
                (DiffKind::Added, "b"),
                (DiffKind::Added, "a"),
                (DiffKind::Changed, "m"),
                (DiffKind::Removed, "z"),
            ]
        );
    }

    #[test]
    fn attaches_parameters_per_spec_shape() {
        let mut added_doc = doc("new", "1");
        added_doc.parameters = BTreeMap::from([("region".to_string(), "eu".to_string())]);

        let mut removed_doc = doc("gone", "1");
        removed_doc.parameters = BTreeMap::from([("region".to_string(), "apac".to_string())]);

        let mut changed_from = doc("home", "1");
        changed_from.parameters = BTreeMap::from([("region".to_string(), "eu".to_string())]);
        let mut changed_to = doc("home", "2");
        changed_to.parameters = BTreeMap::from([("region".to_string(), "apac".to_string())]);

        let from = vec![removed_doc, changed_from];
        let to = vec![added_doc, changed_to];

        let entries = diff(&from, &to);
        let added = entries.iter().find(|e| e.kind == DiffKind::Added).unwrap();
        assert_eq!(
            added.parameters,
            Some(DiffParameters::Single(BTreeMap::from([(
                "region".to_string(),
                "eu".to_string()
            )])))
        );

        let removed = entries.iter().find(|e| e.kind == DiffKind::Removed).unwrap();
        assert_eq!(
            removed.parameters,
            Some(DiffParameters::Single(BTreeMap::from([(
                "region".to_string(),
                "apac".to_string()
            )])))
        );

        let changed = entries.iter().find(|e| e.kind == DiffKind::Changed).unwrap();
        assert_eq!(
            changed.parameters,
            Some(DiffParameters::Changed {
                release_from: BTreeMap::from([("region".to_string(), "eu".to_string())]),
                release_compare_to: BTreeMap::from([("region".to_string(), "apac".to_string())]),
            })
        );
    }

    #[test]
    fn identical_blobs_produce_no_record_even_if_parameters_differ() {
        let mut from_doc = doc("home", "1");
        from_doc.parameters = BTreeMap::from([("region".to_string(), "eu".to_string())]);
        let mut to_doc = doc("home", "1");
        to_doc.parameters = BTreeMap::from([("region".to_string(), "apac".to_string())]);

        let entries = diff(&[from_doc], &[to_doc]);
        assert!(entries.is_empty());
    }
}

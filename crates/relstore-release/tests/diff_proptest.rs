use proptest::prelude::*;
use relstore_core::ReleaseDocument;
use relstore_release::{diff_documents, DiffKind};

fn doc(key: String, json: String) -> ReleaseDocument {
    ReleaseDocument {
        id: uuid::Uuid::nil(),
        document_key: key,
        content_type: "content".into(),
        document_json: Some(json),
        deleted: false,
        parameters: Default::default(),
    }
}

fn arb_docs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        ("[a-e]", "[0-2]").prop_map(|(k, v)| (k, v)),
        0..6,
    )
}

fn kind_rank(kind: DiffKind) -> u8 {
    match kind {
        DiffKind::Added => 0,
        DiffKind::Changed => 1,
        DiffKind::Removed => 2,
    }
}

proptest! {
    #[test]
    fn diff_output_is_grouped_added_changed_removed_and_reverse_sorted_within_group(
        from in arb_docs(),
        to in arb_docs(),
    ) {
        let from_docs: Vec<ReleaseDocument> = from.into_iter().map(|(k, v)| doc(k, v)).collect();
        let to_docs: Vec<ReleaseDocument> = to.into_iter().map(|(k, v)| doc(k, v)).collect();

        let entries = diff_documents(&from_docs, &to_docs);

        let ranks: Vec<u8> = entries.iter().map(|e| kind_rank(e.kind)).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));

        let mut i = 0;
        while i < entries.len() {
            let kind = entries[i].kind;
            let mut j = i;
            while j < entries.len() && entries[j].kind == kind {
                j += 1;
            }
            let group = &entries[i..j];
            for pair in group.windows(2) {
                prop_assert!(pair[0].document_key >= pair[1].document_key);
            }
            i = j;
        }
    }
}

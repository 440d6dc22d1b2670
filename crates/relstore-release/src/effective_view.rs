//! Effective view: the first-wins fold over a release's baseline chain
//! (spec §4.4).

use std::collections::HashMap;

use relstore_core::{DocumentIdentity, ReleaseDocument, Result};
use relstore_store::Store;

use crate::baseline::resolve_chain;

/// Computes the set of documents visible through `release_id`: its own
/// documents first, then each ancestor's in order, with the nearest
/// occurrence of a given [`DocumentIdentity`] winning. A tombstone
/// (`deleted = true`) masks any same-identity document further up the
/// chain and does not itself appear in the result (spec §4.4 invariant 5).
pub async fn effective_view(store: &dyn Store, release_id: uuid::Uuid) -> Result<Vec<ReleaseDocument>> {
    let chain = resolve_chain(store, release_id).await?;

    let mut winners: HashMap<DocumentIdentity, ReleaseDocument> = HashMap::new();
    for release in &chain {
        let docs = store.list_documents(release.uuid).await?;
        for doc in docs {
            winners.entry(doc.identity()).or_insert(doc);
        }
    }

    Ok(winners.into_values().filter(|doc| !doc.deleted).collect())
}

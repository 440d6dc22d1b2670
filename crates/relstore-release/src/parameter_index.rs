//! Parameter index: look releases up by a set of release-level parameters
//! (spec §4.7). A release matches only if every given key/value pair is
//! present on it — an AND across parameters, not an OR.

use std::collections::{BTreeMap, HashMap};

use relstore_core::{Error, Release, Result};
use relstore_store::Store;
use uuid::Uuid;

pub async fn find_releases_by_parameters(
    store: &dyn Store,
    site_code: &str,
    parameters: &BTreeMap<String, String>,
) -> Result<Vec<Release>> {
    if parameters.is_empty() {
        return Err(Error::ParametersMissing);
    }

    let mut candidates: Option<HashMap<Uuid, Release>> = None;

    for (key, value) in parameters {
        let matches = store.find_releases_by_parameter(site_code, key, value).await?;
        let this_round: HashMap<Uuid, Release> =
            matches.into_iter().map(|r| (r.uuid, r)).collect();

        candidates = Some(match candidates {
            None => this_round,
            Some(prior) => prior
                .into_iter()
                .filter(|(id, _)| this_round.contains_key(id))
                .collect(),
        });

        if candidates.as_ref().is_some_and(HashMap::is_empty) {
            break;
        }
    }

    Ok(candidates.unwrap_or_default().into_values().collect())
}

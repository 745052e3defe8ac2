//! URL query codec.
//!
//! Bidirectional mapping between the active filter selection and the query
//! string of a [`CatalogUrl`]. Filter state has no storage of its own: it is
//! always recomputed from the URL with [`derive_state`], and changes are made
//! by producing a new URL ([`toggle`], [`clear_all`]) that implies the
//! desired state.

use nsc_model::{ActiveFilterState, DesignId};

use crate::route::CatalogUrl;
use crate::taxonomy::Taxonomy;

/// State implied by a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedState {
    /// Active filters (one entry per taxonomy category).
    pub filters: ActiveFilterState,
    /// Design id from the detail path segment.
    pub detail_id: Option<DesignId>,
}

/// Derive the full applied state from a URL.
///
/// Without a taxonomy there are no known categories, so the filter state is
/// empty.
pub fn derive_state(url: &CatalogUrl, taxonomy: Option<&Taxonomy>) -> AppliedState {
    AppliedState {
        filters: taxonomy
            .map(|taxonomy| parse(url, taxonomy))
            .unwrap_or_default(),
        detail_id: url.detail_id().cloned(),
    }
}

/// Read the filter selection from a URL.
///
/// For every taxonomy category, all repeated values of its key are
/// collected. Keys outside the taxonomy are ignored. A key that is present
/// with an empty value yields an empty selection, same as an absent key.
/// Slugs under a known key are kept even when the current snapshot does not
/// list them, so the filters shown always match the URL sent to the backend.
pub fn parse(url: &CatalogUrl, taxonomy: &Taxonomy) -> ActiveFilterState {
    let mut state = taxonomy.empty_selection();
    for key in taxonomy.keys() {
        for value in url.values(key).filter(|value| !value.is_empty()) {
            if taxonomy.option(key, value).is_none() {
                tracing::debug!(%key, slug = %value, "URL selects a slug missing from the taxonomy");
            }
            state.insert(key, value);
        }
    }
    state
}

/// Render a filter selection as query pairs.
///
/// Categories follow taxonomy order; categories unknown to the taxonomy
/// follow in key order. Within a category, selection order is kept.
pub fn serialize(state: &ActiveFilterState, taxonomy: &Taxonomy) -> Vec<(String, String)> {
    let known = taxonomy.keys();
    let unknown = state
        .categories()
        .map(|(key, _)| key)
        .filter(|key| !taxonomy.has_category(key));

    known
        .chain(unknown)
        .flat_map(|key| {
            state
                .selected(key)
                .iter()
                .map(move |slug| (key.to_string(), slug.clone()))
        })
        .collect()
}

/// Listing URL (no detail id) implying exactly `state`.
pub fn to_url(state: &ActiveFilterState, taxonomy: &Taxonomy) -> CatalogUrl {
    CatalogUrl::from_parts(None, serialize(state, taxonomy))
}

/// URL identical to `current` except that the pair `(key, slug)` is added
/// or removed.
///
/// `current` must be the URL as it is right now (read from history at call
/// time), never a cached snapshot, or concurrent changes would be lost.
/// Other filters, unrelated parameters and the detail id are preserved. A
/// new pair is placed after the last existing value of the same key.
pub fn toggle(current: &CatalogUrl, key: &str, slug: &str) -> CatalogUrl {
    let mut params = current.params().to_vec();

    if current.has_pair(key, slug) {
        params.retain(|(k, v)| !(k == key && v == slug));
    } else {
        let pair = (key.to_string(), slug.to_string());
        match params.iter().rposition(|(k, _)| k == key) {
            Some(last) => params.insert(last + 1, pair),
            None => params.push(pair),
        }
    }

    current.with_params(params)
}

/// The bare listing path: no query, no detail id.
pub fn clear_all() -> CatalogUrl {
    CatalogUrl::listing()
}

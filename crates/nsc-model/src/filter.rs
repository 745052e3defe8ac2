//! Filter taxonomy and active filter selection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// =============================================================================
// TAXONOMY TYPES
// =============================================================================

/// A selectable value inside a filter category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Display name (e.g., "Rojo").
    pub name: String,
    /// Stable slug, unique within its category (e.g., "rojo").
    pub slug: String,
    /// Icon reference as provided by the backend.
    pub icon: Option<String>,
}

/// A filter category built from the server taxonomy.
///
/// The full set of categories is replaced as a whole on every taxonomy
/// reload; individual categories are never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCategory {
    /// Stable slug used as the URL query key (unique per snapshot).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Icon reference as provided by the backend.
    pub icon: Option<String>,
    /// Selectable options, in server order.
    pub options: Vec<FilterOption>,
}

impl FilterCategory {
    /// Find an option by slug.
    pub fn option(&self, slug: &str) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.slug == slug)
    }

    /// Whether the category has at least one option to filter by.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

// =============================================================================
// ACTIVE FILTER STATE
// =============================================================================

/// Selected option slugs per category key.
///
/// Every category of the taxonomy the state was built against has an entry,
/// possibly empty, so consumers never have to handle a missing category.
/// Within a category, slugs keep insertion order (for chip rendering) but
/// equality is set-based: two states are equal when they cover the same
/// categories and select the same slugs in each, in any order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveFilterState {
    selections: BTreeMap<String, Vec<String>>,
}

impl ActiveFilterState {
    /// Create a state with an empty entry for every given category key.
    pub fn empty_for<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selections: keys
                .into_iter()
                .map(|key| (key.into(), Vec::new()))
                .collect(),
        }
    }

    /// Make sure `key` has an entry, leaving existing selections untouched.
    pub fn ensure_category(&mut self, key: impl Into<String>) {
        self.selections.entry(key.into()).or_default();
    }

    /// Selected slugs for a category, in selection order.
    ///
    /// Unknown categories yield an empty slice.
    pub fn selected(&self, key: &str) -> &[String] {
        self.selections.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the category is part of this state.
    pub fn has_category(&self, key: &str) -> bool {
        self.selections.contains_key(key)
    }

    /// Whether `slug` is selected in `key`.
    pub fn contains(&self, key: &str, slug: &str) -> bool {
        self.selected(key).iter().any(|selected| selected == slug)
    }

    /// Select `slug` in `key`. Returns `false` if it was already selected.
    pub fn insert(&mut self, key: impl Into<String>, slug: impl Into<String>) -> bool {
        let slug = slug.into();
        let values = self.selections.entry(key.into()).or_default();
        if values.contains(&slug) {
            return false;
        }
        values.push(slug);
        true
    }

    /// Deselect `slug` in `key`. Returns `false` if it was not selected.
    ///
    /// The category entry itself is kept.
    pub fn remove(&mut self, key: &str, slug: &str) -> bool {
        match self.selections.get_mut(key) {
            Some(values) => {
                let before = values.len();
                values.retain(|selected| selected != slug);
                values.len() != before
            }
            None => false,
        }
    }

    /// Iterate over `(key, selected slugs)` for every category, sorted by key.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.selections
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterate over every selected `(key, slug)` pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Number of categories covered by the state.
    pub fn category_count(&self) -> usize {
        self.selections.len()
    }

    /// Total number of selected slugs across all categories.
    pub fn selection_count(&self) -> usize {
        self.selections.values().map(Vec::len).sum()
    }

    /// True when nothing is selected (categories may still be present).
    pub fn is_unfiltered(&self) -> bool {
        self.selections.values().all(Vec::is_empty)
    }
}

impl PartialEq for ActiveFilterState {
    fn eq(&self, other: &Self) -> bool {
        self.selections.len() == other.selections.len()
            && self.selections.iter().all(|(key, values)| {
                other.selections.get(key).is_some_and(|theirs| {
                    values.iter().collect::<BTreeSet<_>>() == theirs.iter().collect::<BTreeSet<_>>()
                })
            })
    }
}

impl Eq for ActiveFilterState {}

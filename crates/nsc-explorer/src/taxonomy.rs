//! Taxonomy adapter.
//!
//! Normalizes the server's category/subcategory tree into an ordered list of
//! filter categories keyed by filter-type slug. The whole snapshot is
//! replaced on every load; nothing is merged.

use std::collections::HashSet;
use std::sync::Arc;

use nsc_client::{CategoryDto, SubcategoryDto};
use nsc_model::{ActiveFilterState, FilterCategory, FilterOption};

use crate::error::FetchFailure;

/// An immutable taxonomy snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    /// Active categories with at least one usable option, in server order.
    filterable: Vec<FilterCategory>,
    /// Active categories without usable options. Still shown in non-filter
    /// UI (navigation, headings) but never offered as filters.
    optionless: Vec<FilterCategory>,
}

impl Taxonomy {
    /// Build a snapshot from raw server categories.
    ///
    /// Inactive categories and options are skipped. Keys must be unique per
    /// snapshot and slugs unique per category: the first occurrence wins.
    pub fn from_server(raw: &[CategoryDto]) -> Self {
        let mut seen_keys = HashSet::new();
        let mut filterable = Vec::new();
        let mut optionless = Vec::new();

        for dto in raw.iter().filter(|dto| dto.activo) {
            let key = dto.filter_key();
            if key.is_empty() {
                tracing::warn!(name = %dto.nombre, "Skipping category without a usable key");
                continue;
            }
            if !seen_keys.insert(key.clone()) {
                tracing::warn!(%key, name = %dto.nombre, "Dropping duplicate category key");
                continue;
            }

            let category = FilterCategory {
                label: dto.nombre.clone(),
                icon: dto.icono.clone(),
                options: adapt_options(&key, &dto.subcategorias),
                key,
            };

            if category.has_options() {
                filterable.push(category);
            } else {
                optionless.push(category);
            }
        }

        tracing::debug!(
            filterable = filterable.len(),
            optionless = optionless.len(),
            "Adapted taxonomy"
        );

        Self {
            filterable,
            optionless,
        }
    }

    /// Filter categories, in server order.
    pub fn categories(&self) -> &[FilterCategory] {
        &self.filterable
    }

    /// All active categories, including those without options.
    pub fn all_categories(&self) -> impl Iterator<Item = &FilterCategory> {
        self.filterable.iter().chain(self.optionless.iter())
    }

    /// Look up a filter category by key.
    pub fn category(&self, key: &str) -> Option<&FilterCategory> {
        self.filterable.iter().find(|category| category.key == key)
    }

    /// Whether `key` is a filter category.
    pub fn has_category(&self, key: &str) -> bool {
        self.category(key).is_some()
    }

    /// Look up an option by category key and slug.
    pub fn option(&self, key: &str, slug: &str) -> Option<&FilterOption> {
        self.category(key).and_then(|category| category.option(slug))
    }

    /// Keys of all filter categories, in server order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.filterable.iter().map(|category| category.key.as_str())
    }

    /// True when there is nothing to filter by.
    pub fn is_empty(&self) -> bool {
        self.filterable.is_empty()
    }

    /// A filter state with an empty entry for every category.
    pub fn empty_selection(&self) -> ActiveFilterState {
        ActiveFilterState::empty_for(self.keys())
    }
}

fn adapt_options(key: &str, subcategories: &[SubcategoryDto]) -> Vec<FilterOption> {
    let mut seen = HashSet::new();
    subcategories
        .iter()
        .filter(|sub| sub.activo)
        .filter_map(|sub| {
            let slug = sub.option_slug();
            if slug.is_empty() {
                return None;
            }
            if !seen.insert(slug.clone()) {
                tracing::warn!(%key, %slug, "Dropping duplicate option slug");
                return None;
            }
            Some(FilterOption {
                name: sub.nombre.clone(),
                slug,
                icon: sub.icono.clone(),
            })
        })
        .collect()
}

/// Load state of the taxonomy.
///
/// `Failed` and `Ready` with an empty taxonomy are deliberately distinct:
/// the first offers a retry, the second tells the user there is nothing to
/// filter by.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TaxonomyState {
    /// Fetch in flight.
    #[default]
    Loading,
    /// Snapshot available.
    Ready(Arc<Taxonomy>),
    /// Fetch failed.
    Failed(FetchFailure),
}

impl TaxonomyState {
    /// The current snapshot, if loaded.
    pub fn taxonomy(&self) -> Option<&Arc<Taxonomy>> {
        match self {
            Self::Ready(taxonomy) => Some(taxonomy),
            _ => None,
        }
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure, if the last fetch failed.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

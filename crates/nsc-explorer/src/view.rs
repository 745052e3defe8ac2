//! View model handed to the renderer.
//!
//! [`Explorer::view`] flattens the explorer state into plain serializable
//! data: the filter panel, the active filter chips, the search box, the
//! listing and the overlay. Nothing here holds behavior; every interaction
//! goes back through a [`Message`](crate::Message).

use std::sync::Arc;

use serde::Serialize;

use nsc_model::{CatalogQuery, Design, FilterCategory};

use crate::coordinator::QueryStatus;
use crate::explorer::Explorer;
use crate::history::History;
use crate::taxonomy::{Taxonomy, TaxonomyState};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerView {
    /// Current location.
    pub url: String,
    /// Filter panel.
    pub filters: FilterPanel,
    /// Active filter chips.
    pub chips: Vec<FilterChip>,
    /// Search box.
    pub search: SearchView,
    /// Result listing.
    pub listing: ListingView,
    /// The selected design, once resolved against the loaded page.
    pub overlay: Option<Design>,
}

/// Filter panel content.
///
/// `Error` and `NoCategories` are distinct on purpose: only the first offers
/// a retry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data")]
pub enum FilterPanel {
    /// Taxonomy fetch in flight.
    Loading,
    /// Taxonomy fetch failed; show a retry affordance.
    Error {
        /// Message for the user.
        message: String,
        /// Whether a retry may help.
        retryable: bool,
    },
    /// The taxonomy has no usable categories.
    NoCategories,
    /// Categories to filter by.
    Categories(Vec<CategoryView>),
}

/// One filter category in the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    /// Number of selected options.
    pub selected_count: usize,
    pub options: Vec<OptionView>,
}

/// One option in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub selected: bool,
}

/// A removable chip for one active selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub key: String,
    pub slug: String,
    /// Category label.
    pub category: String,
    /// Option name, or the slug when the taxonomy does not know it.
    pub label: String,
}

/// Search box state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    /// What the input shows.
    pub raw: String,
    /// What the listing was fetched with.
    pub committed: String,
    /// A keystroke is waiting for its quiet window.
    pub pending: bool,
}

/// Result listing state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    /// Designs of the displayed page.
    pub items: Vec<Design>,
    /// Current page cursor.
    pub page: u32,
    /// Page count of the displayed page, if any.
    pub total_pages: Option<u32>,
    /// A fetch is in flight.
    pub loading: bool,
    /// The last fetch failed.
    pub error: Option<ListingError>,
}

/// A failed listing fetch, with the query a retry repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingError {
    pub message: String,
    pub retryable: bool,
    pub query: CatalogQuery,
}

impl<H: History> Explorer<H> {
    /// Build the view model for the current state.
    pub fn view(&self) -> ExplorerView {
        let taxonomy = self.taxonomy().taxonomy();
        let listing = self.listing();

        let overlay = self.overlay().selected_id().and_then(|id| {
            if self.overlay().is_pending() {
                return None;
            }
            listing.displayed().and_then(|page| page.find(id)).cloned()
        });

        let error = match listing.status() {
            QueryStatus::Failed { query, failure } => Some(ListingError {
                message: failure.message.clone(),
                retryable: failure.retryable,
                query: query.clone(),
            }),
            _ => None,
        };

        ExplorerView {
            url: self.history().current().to_string(),
            filters: self.filter_panel(),
            chips: self.chips(taxonomy.map(Arc::as_ref)),
            search: SearchView {
                raw: self.search().raw().to_string(),
                committed: self.search().committed().to_string(),
                pending: self.search().is_pending(),
            },
            listing: ListingView {
                items: listing
                    .displayed()
                    .map(|page| page.items.clone())
                    .unwrap_or_default(),
                page: listing.page(),
                total_pages: listing.total_pages(),
                loading: listing.is_loading(),
                error,
            },
            overlay,
        }
    }

    fn filter_panel(&self) -> FilterPanel {
        match self.taxonomy() {
            TaxonomyState::Loading => FilterPanel::Loading,
            TaxonomyState::Failed(failure) => FilterPanel::Error {
                message: failure.message.clone(),
                retryable: failure.retryable,
            },
            TaxonomyState::Ready(taxonomy) if taxonomy.is_empty() => FilterPanel::NoCategories,
            TaxonomyState::Ready(taxonomy) => FilterPanel::Categories(
                taxonomy
                    .categories()
                    .iter()
                    .map(|category| self.category_view(category))
                    .collect(),
            ),
        }
    }

    fn category_view(&self, category: &FilterCategory) -> CategoryView {
        let filters = &self.applied().filters;
        CategoryView {
            key: category.key.clone(),
            label: category.label.clone(),
            icon: category.icon.clone(),
            selected_count: filters.selected(&category.key).len(),
            options: category
                .options
                .iter()
                .map(|option| OptionView {
                    name: option.name.clone(),
                    slug: option.slug.clone(),
                    icon: option.icon.clone(),
                    selected: filters.contains(&category.key, &option.slug),
                })
                .collect(),
        }
    }

    fn chips(&self, taxonomy: Option<&Taxonomy>) -> Vec<FilterChip> {
        let Some(taxonomy) = taxonomy else {
            return Vec::new();
        };
        let filters = &self.applied().filters;

        taxonomy
            .categories()
            .iter()
            .flat_map(|category| {
                filters.selected(&category.key).iter().map(move |slug| FilterChip {
                    key: category.key.clone(),
                    slug: slug.clone(),
                    category: category.label.clone(),
                    label: category
                        .option(slug)
                        .map_or_else(|| slug.clone(), |option| option.name.clone()),
                })
            })
            .collect()
    }
}

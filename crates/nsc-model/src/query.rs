//! Query triple, request tokens and result pages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::design::{Design, DesignId};
use crate::filter::ActiveFilterState;

/// Pages are 1-based.
pub const FIRST_PAGE: u32 = 1;

/// Monotonically increasing identifier of an issued listing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Create a token from its raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw token value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The token that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three values that determine a listing request.
///
/// Two queries are equal when page, filters (set-equality per category) and
/// the committed search term are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Requested 1-based page.
    pub page: u32,
    /// Active filter selection.
    pub filters: ActiveFilterState,
    /// Committed (debounced) search term.
    pub search: String,
}

impl CatalogQuery {
    /// Same query on a different page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(FIRST_PAGE),
            ..self.clone()
        }
    }

    /// Whether filters and search term match, ignoring the page.
    pub fn same_selection(&self, other: &Self) -> bool {
        self.filters == other.filters && self.search == other.search
    }
}

/// One page of results, tagged with the token of the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Designs on this page.
    pub items: Vec<Design>,
    /// Total number of pages reported by the server.
    pub total_pages: u32,
    /// Token of the request this page answers.
    pub token: RequestToken,
}

impl ResultPage {
    /// Look up a design on this page.
    pub fn find(&self, id: &DesignId) -> Option<&Design> {
        self.items.iter().find(|design| &design.id == id)
    }

    /// Whether the page holds the given design.
    pub fn contains(&self, id: &DesignId) -> bool {
        self.find(id).is_some()
    }
}

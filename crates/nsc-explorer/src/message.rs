//! Messages and effects for the Elm-style explorer loop.
//!
//! Every user interaction and every asynchronous completion reaches the
//! [`Explorer`](crate::Explorer) as a [`Message`]. Its `update` returns the
//! [`Effect`]s the host must perform; their completions come back as
//! messages again.

use std::time::Duration;

use nsc_client::{CategoryDto, DesignPage};
use nsc_model::{DesignId, RequestToken};

use crate::coordinator::FetchRequest;
use crate::debounce::DebounceTicket;
use crate::error::FetchFailure;
use crate::route::CatalogUrl;

/// Root message enum for the explorer.
#[derive(Debug, Clone)]
pub enum Message {
    // =========================================================================
    // Routing
    // =========================================================================
    /// The browser location changed outside the explorer's own writes
    /// (initial load, Back, Forward).
    Navigated(CatalogUrl),

    // =========================================================================
    // Taxonomy
    // =========================================================================
    /// Taxonomy fetch completed.
    TaxonomyLoaded(Result<Vec<CategoryDto>, FetchFailure>),

    /// Retry a failed taxonomy fetch.
    RetryTaxonomy,

    // =========================================================================
    // Filters
    // =========================================================================
    /// Add or remove one option from the selection.
    ToggleFilter { key: String, slug: String },

    /// Drop every filter and the overlay.
    ClearFilters,

    /// A tag on a result card was clicked.
    TagClicked { key: String, slug: String },

    // =========================================================================
    // Search
    // =========================================================================
    /// A keystroke changed the search input.
    SearchInput(String),

    /// The quiet window of a keystroke elapsed.
    SearchQuietElapsed(DebounceTicket),

    /// Enter pressed in the search input.
    SearchSubmitted,

    // =========================================================================
    // Pagination
    // =========================================================================
    /// Jump to a page.
    GoToPage(u32),

    /// Next page.
    NextPage,

    /// Previous page.
    PreviousPage,

    // =========================================================================
    // Listing
    // =========================================================================
    /// Listing fetch completed.
    DesignsLoaded {
        token: RequestToken,
        result: Result<DesignPage, FetchFailure>,
    },

    /// Retry the failed listing query.
    RetryDesigns,

    // =========================================================================
    // Overlay
    // =========================================================================
    /// A design card was clicked.
    OpenDesign(DesignId),

    /// The overlay close button (or Escape) was used.
    CloseOverlay,
}

/// Work the host performs on behalf of the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the taxonomy; answer with [`Message::TaxonomyLoaded`].
    FetchTaxonomy,

    /// Fetch a listing page; answer with [`Message::DesignsLoaded`] carrying
    /// the request token.
    FetchDesigns(FetchRequest),

    /// Wait `after`, then send [`Message::SearchQuietElapsed`] with `ticket`.
    ScheduleDebounce {
        ticket: DebounceTicket,
        after: Duration,
    },
}

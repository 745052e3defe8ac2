//! Detail overlay router.
//!
//! Keeps the design id in the URL path and the open/closed overlay in sync
//! with the history stack. How the overlay was opened is carried as an
//! explicit [`OverlaySource`] and never guessed from the history length.
//!
//! History rules:
//!
//! - opening from the list adds one entry, so Back closes the overlay
//! - a direct link never adds an entry; the loaded URL is the current one
//! - closing an in-app overlay goes back when the entry beneath is its
//!   listing (pushed by the router, or reached again by Forward), otherwise
//!   it replaces the current entry with the id dropped

use nsc_model::{DesignId, ResultPage};

use crate::history::History;
use crate::route::CatalogUrl;

/// How an open overlay was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySource {
    /// Clicked in the list, or reached by in-session Back/Forward.
    InApp,
    /// The session started at a detail URL.
    DirectLink,
}

/// Overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverlayState {
    /// No design selected.
    #[default]
    Closed,
    /// A design is selected.
    Open {
        /// Selected design.
        id: DesignId,
        /// How it was opened.
        source: OverlaySource,
        /// Whether the id was found in the loaded page. Only a route arrival
        /// can be unresolved, until the next page is applied.
        resolved: bool,
    },
}

impl OverlayState {
    /// Selected id, if open.
    pub fn selected_id(&self) -> Option<&DesignId> {
        match self {
            Self::Open { id, .. } => Some(id),
            Self::Closed => None,
        }
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// How [`OverlayRouter::close`] left the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Nothing was open.
    AlreadyClosed,
    /// Went back over the entry the router pushed. The resulting location
    /// arrives later as a navigation.
    Popped,
    /// The current entry was replaced with the id dropped.
    Replaced,
}

/// Result of checking the overlay against a newly applied page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Closed, or already resolved and still present.
    Unchanged,
    /// The pending id was found.
    Resolved,
    /// The id is not on the page; the overlay closed quietly by replacing
    /// the current entry.
    SoftClosed,
    /// The id is not on the page; the overlay closed by going back to the
    /// listing beneath. The location arrives later as a navigation.
    Popped,
}

/// Owns [`OverlayState`] and its history writes.
#[derive(Debug, Clone, Default)]
pub struct OverlayRouter {
    state: OverlayState,
    /// Listing URL beneath the entry the router pushed, while that entry is
    /// still the one shown.
    pushed_over: Option<CatalogUrl>,
    /// Set once the first route of the session has been seen.
    route_seen: bool,
}

impl OverlayRouter {
    /// A closed router that has not seen any route yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Selected id, if open.
    pub fn selected_id(&self) -> Option<&DesignId> {
        self.state.selected_id()
    }

    /// Source of the open overlay.
    pub fn source(&self) -> Option<OverlaySource> {
        match &self.state {
            OverlayState::Open { source, .. } => Some(*source),
            OverlayState::Closed => None,
        }
    }

    /// Whether the open overlay is still waiting for its id to be resolved.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, OverlayState::Open { resolved: false, .. })
    }

    /// React to a route change (initial load, Back, Forward).
    ///
    /// The first route of the session that carries an id opens as
    /// [`OverlaySource::DirectLink`]; later arrivals at a detail URL are
    /// in-app. Either way the id stays pending until a page is applied.
    pub fn route_changed(&mut self, url: &CatalogUrl) {
        let first = !self.route_seen;
        self.route_seen = true;

        let Some(id) = url.detail_id() else {
            if self.state.is_open() {
                tracing::debug!("Route dropped the design id, closing overlay");
            }
            self.state = OverlayState::Closed;
            self.pushed_over = None;
            return;
        };

        if self.selected_id() == Some(id) {
            return;
        }

        let source = if first {
            OverlaySource::DirectLink
        } else {
            OverlaySource::InApp
        };
        tracing::debug!(%id, ?source, "Route opened overlay");
        self.state = OverlayState::Open {
            id: id.clone(),
            source,
            resolved: false,
        };
        self.pushed_over = None;
    }

    /// Open a design clicked in the list.
    ///
    /// From the closed state this pushes the detail URL. When a design is
    /// already open over a pushed entry, the detail entry is replaced so one
    /// Back still leaves the overlay. When the open design came from a route
    /// (nothing pushed), its entry becomes the listing and the new detail is
    /// pushed on top.
    pub fn open_from_list<H: History>(&mut self, id: DesignId, history: &mut H) {
        let current = history.current();
        let listing = current.without_detail();
        let target = current.with_detail(id.clone());

        let over_pushed_entry = self.pushed_over.is_some();
        match (self.state.is_open(), over_pushed_entry) {
            (true, true) => history.replace(&target),
            (true, false) => {
                history.replace(&listing);
                history.push(&target);
                self.pushed_over = Some(listing);
            }
            (false, _) => {
                history.push(&target);
                self.pushed_over = Some(listing);
            }
        }

        tracing::debug!(%id, "Opened overlay from list");
        self.route_seen = true;
        self.state = OverlayState::Open {
            id,
            source: OverlaySource::InApp,
            resolved: true,
        };
    }

    /// Close the overlay.
    ///
    /// Goes back when the entry beneath is the listing of the visible
    /// query; otherwise replaces the current entry with the id dropped. A
    /// direct link always replaces.
    pub fn close<H: History>(&mut self, history: &mut H) -> CloseOutcome {
        let in_app = match self.source() {
            Some(source) => source == OverlaySource::InApp,
            None => return CloseOutcome::AlreadyClosed,
        };

        let listing = history.current().without_detail();
        let pushed_over = self.pushed_over.take();
        let outcome = if in_app && listing_beneath(pushed_over.as_ref(), &listing, history) {
            history.back();
            CloseOutcome::Popped
        } else {
            history.replace(&listing);
            CloseOutcome::Replaced
        };

        tracing::debug!(?outcome, "Closed overlay");
        self.state = OverlayState::Closed;
        outcome
    }

    /// Close without touching history; the caller writes the URL.
    pub fn dismiss(&mut self) {
        self.state = OverlayState::Closed;
        self.pushed_over = None;
    }

    /// Check the selected id against a newly applied page.
    ///
    /// An id missing from the page closes the overlay quietly, keeping the
    /// query. An in-app overlay over its listing goes back; anything else
    /// replaces the current entry with the id dropped.
    pub fn resolve<H: History>(&mut self, page: &ResultPage, history: &mut H) -> Resolution {
        let OverlayState::Open {
            id,
            source,
            resolved,
        } = &mut self.state
        else {
            return Resolution::Unchanged;
        };

        if page.contains(id) {
            if *resolved {
                return Resolution::Unchanged;
            }
            *resolved = true;
            return Resolution::Resolved;
        }

        tracing::info!(%id, "Design not on the loaded page, closing overlay");
        let in_app = *source == OverlaySource::InApp;
        let listing = history.current().without_detail();
        let resolution =
            if in_app && listing_beneath(self.pushed_over.as_ref(), &listing, history) {
                history.back();
                Resolution::Popped
            } else {
                history.replace(&listing);
                Resolution::SoftClosed
            };
        self.state = OverlayState::Closed;
        self.pushed_over = None;
        resolution
    }
}

/// Whether going back from the current detail entry lands on `listing`.
fn listing_beneath<H: History>(
    pushed_over: Option<&CatalogUrl>,
    listing: &CatalogUrl,
    history: &H,
) -> bool {
    pushed_over == Some(listing) || history.previous().as_ref() == Some(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use nsc_model::{Design, RequestToken};

    fn url(input: &str) -> CatalogUrl {
        CatalogUrl::parse(input).expect("valid url")
    }

    fn page(ids: &[&str]) -> ResultPage {
        ResultPage {
            items: ids
                .iter()
                .map(|id| Design {
                    id: DesignId::new(*id),
                    name: (*id).to_string(),
                    description: None,
                    image_url: None,
                    tags: Vec::new(),
                })
                .collect(),
            total_pages: 1,
            token: RequestToken::new(1),
        }
    }

    #[test]
    fn test_open_from_list_then_back() {
        let start = url("/explorar-unas?color=red");
        let mut history = MemoryHistory::new(start.clone());
        let mut router = OverlayRouter::new();
        router.route_changed(&start);

        router.open_from_list(DesignId::new("7"), &mut history);
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), url("/explorar-unas/7?color=red"));
        assert_eq!(router.source(), Some(OverlaySource::InApp));

        history.back();
        router.route_changed(&history.current());
        assert_eq!(router.state(), &OverlayState::Closed);
        assert_eq!(history.current(), start);
    }

    #[test]
    fn test_close_in_app_pops() {
        let mut history = MemoryHistory::new(url("/explorar-unas"));
        let mut router = OverlayRouter::new();
        router.route_changed(&history.current());
        router.open_from_list(DesignId::new("7"), &mut history);

        assert_eq!(router.close(&mut history), CloseOutcome::Popped);
        assert_eq!(history.index(), 0);
        assert_eq!(router.close(&mut history), CloseOutcome::AlreadyClosed);
    }

    #[test]
    fn test_direct_link_close_replaces() {
        let start = url("/explorar-unas/9?size=m");
        let mut history = MemoryHistory::new(start.clone());
        let mut router = OverlayRouter::new();
        router.route_changed(&start);

        assert_eq!(router.source(), Some(OverlaySource::DirectLink));
        assert!(router.is_pending());
        assert_eq!(router.resolve(&page(&["9"]), &mut history), Resolution::Resolved);

        assert_eq!(router.close(&mut history), CloseOutcome::Replaced);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), url("/explorar-unas?size=m"));
    }

    #[test]
    fn test_missing_direct_link_soft_closes() {
        let start = url("/explorar-unas/999?color=red");
        let mut history = MemoryHistory::new(start.clone());
        let mut router = OverlayRouter::new();
        router.route_changed(&start);

        assert_eq!(
            router.resolve(&page(&["1", "2"]), &mut history),
            Resolution::SoftClosed
        );
        assert_eq!(router.state(), &OverlayState::Closed);
        assert_eq!(history.current(), url("/explorar-unas?color=red"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_later_route_with_id_is_in_app() {
        let mut history = MemoryHistory::new(url("/explorar-unas"));
        let mut router = OverlayRouter::new();
        router.route_changed(&history.current());

        history.push(&url("/explorar-unas/4"));
        router.route_changed(&history.current());
        assert_eq!(router.source(), Some(OverlaySource::InApp));
        assert!(router.is_pending());
    }

    #[test]
    fn test_open_over_direct_link_puts_listing_beneath() {
        let mut history = MemoryHistory::new(url("/explorar-unas/1?color=red"));
        let mut router = OverlayRouter::new();
        router.route_changed(&history.current());
        router.resolve(&page(&["1", "2"]), &mut history);

        router.open_from_list(DesignId::new("2"), &mut history);
        assert_eq!(
            history.entries(),
            [url("/explorar-unas?color=red"), url("/explorar-unas/2?color=red")]
        );
        assert_eq!(router.close(&mut history), CloseOutcome::Popped);
        assert_eq!(history.current(), url("/explorar-unas?color=red"));
    }

    #[test]
    fn test_switching_designs_keeps_one_entry() {
        let mut history = MemoryHistory::new(url("/explorar-unas"));
        let mut router = OverlayRouter::new();
        router.route_changed(&history.current());
        router.open_from_list(DesignId::new("1"), &mut history);
        router.open_from_list(DesignId::new("2"), &mut history);

        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), url("/explorar-unas/2"));
        assert_eq!(router.close(&mut history), CloseOutcome::Popped);
        assert_eq!(history.current(), url("/explorar-unas"));
    }

    #[test]
    fn test_close_after_query_change_replaces() {
        let mut history = MemoryHistory::new(url("/explorar-unas"));
        let mut router = OverlayRouter::new();
        router.route_changed(&history.current());
        router.open_from_list(DesignId::new("1"), &mut history);
        history.replace(&url("/explorar-unas/1?color=red"));

        assert_eq!(router.close(&mut history), CloseOutcome::Replaced);
        assert_eq!(history.current(), url("/explorar-unas?color=red"));
    }

    #[test]
    fn test_close_after_forward_pops() {
        let mut history = MemoryHistory::new(url("/explorar-unas?color=red"));
        let mut router = OverlayRouter::new();
        router.route_changed(&history.current());
        router.open_from_list(DesignId::new("1"), &mut history);

        history.back();
        router.route_changed(&history.current());
        history.forward();
        router.route_changed(&history.current());
        assert_eq!(router.source(), Some(OverlaySource::InApp));

        assert_eq!(router.close(&mut history), CloseOutcome::Popped);
        assert_eq!(
            history.entries(),
            [url("/explorar-unas?color=red"), url("/explorar-unas/1?color=red")]
        );
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_vanished_in_app_design_goes_back_to_listing() {
        let mut history = MemoryHistory::new(url("/explorar-unas"));
        let mut router = OverlayRouter::new();
        router.route_changed(&history.current());
        router.open_from_list(DesignId::new("1"), &mut history);
        history.back();
        router.route_changed(&history.current());
        history.forward();
        router.route_changed(&history.current());

        assert_eq!(router.resolve(&page(&["3"]), &mut history), Resolution::Popped);
        assert_eq!(router.state(), &OverlayState::Closed);
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), url("/explorar-unas"));
    }
}

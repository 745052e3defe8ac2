//! The catalog explorer state machine.
//!
//! [`Explorer`] wires the components together. The URL in [`History`] is the
//! single source of truth for filters and the selected design: user actions
//! write a new URL and the applied state is derived from it again, never
//! edited in place.

use std::sync::Arc;
use std::time::Duration;

use nsc_model::{DesignId, FIRST_PAGE};

use crate::codec::{self, AppliedState, derive_state};
use crate::coordinator::{ApplyOutcome, FetchRequest, QueryCoordinator};
use crate::debounce::{DEFAULT_QUIET_WINDOW, SearchDebouncer};
use crate::history::History;
use crate::message::{Effect, Message};
use crate::overlay::{CloseOutcome, OverlayRouter, Resolution};
use crate::route::CatalogUrl;
use crate::tag::TagShortcut;
use crate::taxonomy::{Taxonomy, TaxonomyState};

/// Catalog exploration engine.
#[derive(Debug)]
pub struct Explorer<H: History> {
    history: H,
    /// URL the applied state was last derived from.
    route: CatalogUrl,
    applied: AppliedState,
    taxonomy: TaxonomyState,
    debouncer: SearchDebouncer,
    coordinator: QueryCoordinator,
    overlay: OverlayRouter,
    /// The listing waits for the taxonomy to settle so the URL's filters are
    /// known before the first fetch.
    listing_enabled: bool,
}

impl<H: History> Explorer<H> {
    /// Explorer with the default search quiet window.
    pub fn new(history: H) -> Self {
        Self::with_quiet_window(history, DEFAULT_QUIET_WINDOW)
    }

    /// Explorer with a custom search quiet window.
    pub fn with_quiet_window(history: H, quiet: Duration) -> Self {
        let route = history.current();
        Self {
            history,
            applied: derive_state(&route, None),
            route,
            taxonomy: TaxonomyState::Loading,
            debouncer: SearchDebouncer::new(quiet),
            coordinator: QueryCoordinator::new(),
            overlay: OverlayRouter::new(),
            listing_enabled: false,
        }
    }

    /// Match the initial route and request the taxonomy.
    pub fn start(&mut self) -> Vec<Effect> {
        let url = self.history.current();
        tracing::info!(%url, "Starting catalog explorer");
        self.overlay.route_changed(&url);
        self.rederive();
        self.taxonomy = TaxonomyState::Loading;
        vec![Effect::FetchTaxonomy]
    }

    /// Process one message.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Navigated(url) => self.handle_navigated(url),

            Message::TaxonomyLoaded(result) => {
                self.taxonomy = match result {
                    Ok(raw) => TaxonomyState::Ready(Arc::new(Taxonomy::from_server(&raw))),
                    Err(failure) => {
                        tracing::warn!(detail = %failure.detail, "Taxonomy fetch failed");
                        TaxonomyState::Failed(failure)
                    }
                };
                self.listing_enabled = true;
                self.rederive();
                self.refresh_listing(false)
            }

            Message::RetryTaxonomy => {
                if self.taxonomy.failure().is_none() {
                    return Vec::new();
                }
                tracing::info!("Retrying taxonomy fetch");
                self.taxonomy = TaxonomyState::Loading;
                vec![Effect::FetchTaxonomy]
            }

            Message::ToggleFilter { key, slug } => {
                let url = codec::toggle(&self.history.current(), &key, &slug);
                self.history.replace(&url);
                self.rederive();
                self.refresh_listing(false)
            }

            Message::ClearFilters => {
                self.overlay.dismiss();
                self.history.replace(&codec::clear_all());
                self.rederive();
                self.refresh_listing(false)
            }

            Message::TagClicked { key, slug } => {
                TagShortcut::new(key, slug).dispatch(
                    &mut self.history,
                    &mut self.debouncer,
                    &mut self.overlay,
                );
                self.rederive();
                self.refresh_listing(true)
            }

            Message::SearchInput(raw) => {
                let ticket = self.debouncer.input(raw);
                vec![Effect::ScheduleDebounce {
                    ticket,
                    after: self.debouncer.quiet_window(),
                }]
            }

            Message::SearchQuietElapsed(ticket) => match self.debouncer.quiet_elapsed(ticket) {
                Some(term) => {
                    tracing::debug!(%term, "Committed search term");
                    self.refresh_listing(false)
                }
                None => Vec::new(),
            },

            Message::SearchSubmitted => match self.debouncer.flush() {
                Some(_) => self.refresh_listing(false),
                None => Vec::new(),
            },

            Message::GoToPage(page) => self.paginate(|coordinator| coordinator.set_page(page)),
            Message::NextPage => self.paginate(QueryCoordinator::next_page),
            Message::PreviousPage => self.paginate(QueryCoordinator::previous_page),

            Message::DesignsLoaded { token, result } => {
                match self.coordinator.apply(token, result) {
                    ApplyOutcome::Applied => {
                        self.resolve_overlay();
                        Vec::new()
                    }
                    ApplyOutcome::Repaired(request) => vec![Effect::FetchDesigns(request)],
                    ApplyOutcome::Stale | ApplyOutcome::Failed => Vec::new(),
                }
            }

            Message::RetryDesigns => fetch(self.coordinator.retry()),

            Message::OpenDesign(id) => {
                self.open_design(id);
                Vec::new()
            }

            Message::CloseOverlay => {
                if self.overlay.close(&mut self.history) == CloseOutcome::Replaced {
                    self.rederive();
                }
                Vec::new()
            }
        }
    }

    /// The history this explorer writes to.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable history, for hosts that drive Back/Forward themselves.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Whether the history location differs from the route last applied.
    ///
    /// True after a Back the explorer issued itself until the resulting
    /// [`Message::Navigated`] is processed.
    pub fn awaiting_navigation(&self) -> bool {
        self.history.current() != self.route
    }

    /// State derived from the current route.
    pub fn applied(&self) -> &AppliedState {
        &self.applied
    }

    /// Taxonomy load state.
    pub fn taxonomy(&self) -> &TaxonomyState {
        &self.taxonomy
    }

    /// Search term state.
    pub fn search(&self) -> &SearchDebouncer {
        &self.debouncer
    }

    /// Listing state.
    pub fn listing(&self) -> &QueryCoordinator {
        &self.coordinator
    }

    /// Overlay state.
    pub fn overlay(&self) -> &OverlayRouter {
        &self.overlay
    }

    fn handle_navigated(&mut self, url: CatalogUrl) -> Vec<Effect> {
        tracing::debug!(%url, "Navigated");
        self.overlay.route_changed(&url);
        self.rederive();
        self.refresh_listing(false)
    }

    fn open_design(&mut self, id: DesignId) {
        let on_page = self
            .coordinator
            .displayed()
            .is_some_and(|page| page.contains(&id));
        if !on_page {
            tracing::warn!(%id, "Ignoring open request for a design not on the page");
            return;
        }
        self.overlay.open_from_list(id, &mut self.history);
        self.rederive();
    }

    fn paginate(
        &mut self,
        step: impl FnOnce(&mut QueryCoordinator) -> Option<FetchRequest>,
    ) -> Vec<Effect> {
        if !self.listing_enabled {
            return Vec::new();
        }
        fetch(step(&mut self.coordinator))
    }

    /// Bring the listing in line with the applied filters and committed
    /// term. `reset_page` forces page 1 even when neither changed.
    fn refresh_listing(&mut self, reset_page: bool) -> Vec<Effect> {
        if !self.listing_enabled {
            return Vec::new();
        }

        let mut request = self
            .coordinator
            .sync(&self.applied.filters, self.debouncer.committed());
        if request.is_none() && reset_page {
            request = self.coordinator.set_page(FIRST_PAGE);
        }

        if request.is_none() {
            self.resolve_overlay();
        }
        fetch(request)
    }

    /// Check the overlay against the displayed page, once nothing newer is
    /// on the way.
    fn resolve_overlay(&mut self) {
        if self.coordinator.is_loading() {
            return;
        }
        let Some(page) = self.coordinator.displayed() else {
            return;
        };
        match self.overlay.resolve(page, &mut self.history) {
            Resolution::SoftClosed => self.rederive(),
            Resolution::Popped | Resolution::Resolved | Resolution::Unchanged => {}
        }
    }

    fn rederive(&mut self) {
        self.route = self.history.current();
        self.applied = derive_state(&self.route, self.taxonomy.taxonomy().map(Arc::as_ref));
    }
}

fn fetch(request: Option<FetchRequest>) -> Vec<Effect> {
    request.map(Effect::FetchDesigns).into_iter().collect()
}

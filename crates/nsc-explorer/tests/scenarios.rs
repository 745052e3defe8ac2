//! End-to-end explorer scenarios driven message by message.

mod common;

use common::{design, only_fetch, page, salon_taxonomy, url};
use nsc_client::DesignPage;
use nsc_explorer::{
    Effect, Explorer, FetchFailure, FetchRequest, FilterPanel, History, MemoryHistory, Message,
    OverlaySource, OverlayState,
};
use nsc_model::DesignId;
use pretty_assertions::assert_eq;

/// Explorer at `start` with the salon taxonomy loaded and the first page
/// applied.
fn ready_explorer(start: &str, first_page: DesignPage) -> Explorer<MemoryHistory> {
    let mut explorer = Explorer::new(MemoryHistory::new(url(start)));
    assert_eq!(explorer.start(), vec![Effect::FetchTaxonomy]);
    let request = only_fetch(&explorer.update(Message::TaxonomyLoaded(Ok(salon_taxonomy()))));
    deliver(&mut explorer, &request, first_page);
    explorer
}

fn deliver(explorer: &mut Explorer<MemoryHistory>, request: &FetchRequest, page: DesignPage) -> Vec<Effect> {
    explorer.update(Message::DesignsLoaded {
        token: request.token,
        result: Ok(page),
    })
}

fn toggle(key: &str, slug: &str) -> Message {
    Message::ToggleFilter {
        key: key.to_string(),
        slug: slug.to_string(),
    }
}

fn commit_search(explorer: &mut Explorer<MemoryHistory>, term: &str) -> Vec<Effect> {
    let effects = explorer.update(Message::SearchInput(term.to_string()));
    let [Effect::ScheduleDebounce { ticket, .. }] = effects.as_slice() else {
        panic!("expected a debounce, got {effects:?}");
    };
    explorer.update(Message::SearchQuietElapsed(*ticket))
}

#[test]
fn filter_change_resets_page() {
    let mut explorer = ready_explorer("/explorar-unas", page(&["1"], 5));
    let request = only_fetch(&explorer.update(Message::GoToPage(3)));
    deliver(&mut explorer, &request, page(&["31"], 5));
    assert_eq!(explorer.listing().page(), 3);

    let request = only_fetch(&explorer.update(toggle("color", "red")));
    assert_eq!(request.query.page, 1);
    assert_eq!(request.query.filters.selected("color"), ["red"]);
}

#[test]
fn search_change_resets_page() {
    let mut explorer = ready_explorer("/explorar-unas?size=m", page(&["1"], 4));
    let request = only_fetch(&explorer.update(Message::NextPage));
    assert_eq!(request.query.page, 2);
    deliver(&mut explorer, &request, page(&["2"], 4));

    let request = only_fetch(&commit_search(&mut explorer, "chrome"));
    assert_eq!(request.query.page, 1);
    assert_eq!(request.query.search, "chrome");
    assert_eq!(request.query.filters.selected("size"), ["m"]);

    deliver(&mut explorer, &request, page(&["c1"], 4));
    let request = only_fetch(&explorer.update(Message::GoToPage(2)));
    assert_eq!(request.query.search, "chrome");
    deliver(&mut explorer, &request, page(&["c2"], 4));

    let request = only_fetch(&commit_search(&mut explorer, ""));
    assert_eq!(request.query.page, 1);
    assert_eq!(request.query.search, "");
}

#[test]
fn clear_filters_resets_page_and_url() {
    let mut explorer = ready_explorer("/explorar-unas?color=red&utm=ig", page(&["1"], 3));
    let request = only_fetch(&explorer.update(Message::GoToPage(2)));
    deliver(&mut explorer, &request, page(&["2"], 3));

    let request = only_fetch(&explorer.update(Message::ClearFilters));
    assert_eq!(request.query.page, 1);
    assert!(request.query.filters.is_unfiltered());
    assert_eq!(explorer.history().current(), url("/explorar-unas"));
    assert_eq!(explorer.history().len(), 1);
}

#[test]
fn toggle_reads_the_live_url() {
    let mut explorer = ready_explorer("/explorar-unas?color=red", page(&["1"], 1));
    explorer
        .history_mut()
        .replace(&url("/explorar-unas?color=red&utm=ig"));

    explorer.update(toggle("size", "s"));
    assert_eq!(
        explorer.history().current(),
        url("/explorar-unas?color=red&utm=ig&size=s")
    );
}

#[test]
fn stale_response_never_displays() {
    let mut explorer = ready_explorer("/explorar-unas", page(&["1"], 1));
    let first = only_fetch(&explorer.update(toggle("color", "red")));
    let second = only_fetch(&explorer.update(toggle("color", "blue")));
    assert!(second.token > first.token);

    deliver(&mut explorer, &second, page(&["red-or-blue"], 1));
    deliver(&mut explorer, &first, page(&["red-only"], 1));

    let view = explorer.view();
    assert_eq!(view.listing.items, vec![design("red-or-blue")]);
    assert!(!view.listing.loading);
}

#[test]
fn page_past_end_is_repaired() {
    let mut explorer = ready_explorer("/explorar-unas", page(&["1"], 9));
    let request = only_fetch(&explorer.update(Message::GoToPage(9)));
    let repair = only_fetch(&deliver(&mut explorer, &request, page(&[], 2)));
    assert_eq!(repair.query.page, 1);
    assert_eq!(repair.query.filters, request.query.filters);

    deliver(&mut explorer, &repair, page(&["1"], 2));
    assert_eq!(explorer.view().listing.page, 1);
}

#[test]
fn retry_repeats_failed_query() {
    let mut explorer = ready_explorer("/explorar-unas?color=green", page(&["1"], 3));
    commit_search(&mut explorer, "gel");
    let request = explorer.listing().in_flight().cloned().expect("in flight");
    deliver(&mut explorer, &request, page(&["g1"], 3));

    let failing = only_fetch(&explorer.update(Message::GoToPage(2)));
    explorer.update(Message::DesignsLoaded {
        token: failing.token,
        result: Err(FetchFailure::new("Sin conexión", "connection reset", true)),
    });

    let error = explorer.view().listing.error.expect("listing error");
    assert_eq!(error.query, failing.query);

    let retry = only_fetch(&explorer.update(Message::RetryDesigns));
    assert_eq!(retry.query, failing.query);
    assert_eq!(retry.query.page, 2);
    assert_eq!(retry.query.search, "gel");
}

#[test]
fn open_from_list_then_back_restores_listing() {
    let start = "/explorar-unas?color=red";
    let mut explorer = ready_explorer(start, page(&["1", "2"], 1));

    explorer.update(Message::OpenDesign(DesignId::new("2")));
    assert_eq!(explorer.history().current(), url("/explorar-unas/2?color=red"));
    assert_eq!(explorer.overlay().source(), Some(OverlaySource::InApp));
    assert_eq!(explorer.view().overlay, Some(design("2")));

    explorer.history_mut().back();
    let current = explorer.history().current();
    assert!(explorer.update(Message::Navigated(current)).is_empty());

    assert_eq!(explorer.overlay().state(), &OverlayState::Closed);
    assert_eq!(explorer.history().current(), url(start));
    assert_eq!(explorer.applied().detail_id, None);
}

#[test]
fn close_after_open_from_list_goes_back() {
    let mut explorer = ready_explorer("/explorar-unas", page(&["1"], 1));
    explorer.update(Message::OpenDesign(DesignId::new("1")));

    explorer.update(Message::CloseOverlay);
    assert!(explorer.awaiting_navigation());
    assert_eq!(explorer.history().index(), 0);

    let current = explorer.history().current();
    explorer.update(Message::Navigated(current));
    assert!(!explorer.awaiting_navigation());
    assert!(!explorer.overlay().state().is_open());
}

#[test]
fn direct_link_close_adds_no_entry() {
    let mut explorer = ready_explorer("/explorar-unas/7?size=l", page(&["7", "8"], 1));
    assert_eq!(explorer.overlay().source(), Some(OverlaySource::DirectLink));
    assert_eq!(explorer.view().overlay, Some(design("7")));

    explorer.update(Message::CloseOverlay);
    assert_eq!(explorer.history().current(), url("/explorar-unas?size=l"));
    assert_eq!(explorer.history().len(), 1);
    assert!(!explorer.history().can_go_back());

    explorer.history_mut().back();
    assert_eq!(explorer.history().current(), url("/explorar-unas?size=l"));
    assert!(!explorer.overlay().state().is_open());
}

#[test]
fn empty_taxonomy_shows_message_and_still_lists() {
    let mut explorer = Explorer::new(MemoryHistory::new(url("/explorar-unas?color=red")));
    explorer.start();
    assert_eq!(explorer.view().filters, FilterPanel::Loading);

    let request = only_fetch(&explorer.update(Message::TaxonomyLoaded(Ok(Vec::new()))));
    assert_eq!(request.query.page, 1);
    assert!(request.query.filters.is_unfiltered());
    assert_eq!(explorer.view().filters, FilterPanel::NoCategories);

    deliver(&mut explorer, &request, page(&["1", "2"], 6));
    let view = explorer.view();
    assert_eq!(view.listing.items.len(), 2);
    assert_eq!(view.listing.total_pages, Some(6));
}

#[test]
fn taxonomy_failure_is_distinct_from_empty() {
    let mut explorer = Explorer::new(MemoryHistory::default());
    explorer.start();
    let failure = FetchFailure::new("No pudimos cargar las categorías.", "503", true);
    let request = only_fetch(&explorer.update(Message::TaxonomyLoaded(Err(failure))));
    assert!(request.query.filters.is_unfiltered());

    assert_eq!(
        explorer.view().filters,
        FilterPanel::Error {
            message: "No pudimos cargar las categorías.".to_string(),
            retryable: true,
        }
    );

    assert_eq!(explorer.update(Message::RetryTaxonomy), vec![Effect::FetchTaxonomy]);
    explorer.update(Message::TaxonomyLoaded(Ok(salon_taxonomy())));
    assert!(matches!(explorer.view().filters, FilterPanel::Categories(ref c) if c.len() == 3));
}

#[test]
fn tag_shortcut_starts_fresh_exploration() {
    let mut explorer = ready_explorer(
        "/explorar-unas?color=red&color=blue&size=m",
        page(&["1", "2"], 4),
    );
    let request = only_fetch(&commit_search(&mut explorer, "gel"));
    deliver(&mut explorer, &request, page(&["1", "2"], 4));
    let request = only_fetch(&explorer.update(Message::GoToPage(2)));
    deliver(&mut explorer, &request, page(&["3", "4"], 4));
    explorer.update(Message::OpenDesign(DesignId::new("3")));

    let request = only_fetch(&explorer.update(Message::TagClicked {
        key: "material".to_string(),
        slug: "silk".to_string(),
    }));

    let filters = &explorer.applied().filters;
    assert_eq!(filters.selected("material"), ["silk"]);
    assert_eq!(filters.selection_count(), 1);
    assert_eq!(request.query.page, 1);
    assert_eq!(request.query.search, "");
    assert_eq!(&request.query.filters, filters);
    assert_eq!(explorer.search().raw(), "");
    assert!(!explorer.overlay().state().is_open());
    assert_eq!(explorer.history().current(), url("/explorar-unas?material=silk"));
}

#[test]
fn tag_shortcut_on_same_selection_still_resets_page() {
    let mut explorer = ready_explorer("/explorar-unas?material=silk", page(&["1"], 3));
    let request = only_fetch(&explorer.update(Message::GoToPage(3)));
    deliver(&mut explorer, &request, page(&["9"], 3));

    let request = only_fetch(&explorer.update(Message::TagClicked {
        key: "material".to_string(),
        slug: "silk".to_string(),
    }));
    assert_eq!(request.query.page, 1);
}

#[test]
fn vanished_direct_link_soft_closes() {
    let mut explorer = Explorer::new(MemoryHistory::new(url("/explorar-unas/999?color=red")));
    explorer.start();
    assert_eq!(explorer.overlay().source(), Some(OverlaySource::DirectLink));

    let request = only_fetch(&explorer.update(Message::TaxonomyLoaded(Ok(salon_taxonomy()))));
    assert_eq!(request.query.filters.selected("color"), ["red"]);
    assert_eq!(explorer.view().overlay, None);

    deliver(&mut explorer, &request, page(&["1", "2"], 1));

    assert_eq!(explorer.overlay().state(), &OverlayState::Closed);
    assert_eq!(explorer.history().current(), url("/explorar-unas?color=red"));
    assert_eq!(explorer.history().len(), 1);
    let view = explorer.view();
    assert_eq!(view.listing.error, None);
    assert_eq!(view.overlay, None);
    assert_eq!(explorer.applied().detail_id, None);
}

#[test]
fn listing_error_does_not_close_pending_direct_link() {
    let mut explorer = Explorer::new(MemoryHistory::new(url("/explorar-unas/5")));
    explorer.start();
    let request = only_fetch(&explorer.update(Message::TaxonomyLoaded(Ok(salon_taxonomy()))));
    explorer.update(Message::DesignsLoaded {
        token: request.token,
        result: Err(FetchFailure::new("Error del servidor", "500", true)),
    });

    assert!(explorer.overlay().is_pending());
    assert_eq!(explorer.history().current(), url("/explorar-unas/5"));

    let retry = only_fetch(&explorer.update(Message::RetryDesigns));
    deliver(&mut explorer, &retry, page(&["5"], 1));
    assert_eq!(explorer.view().overlay, Some(design("5")));
}

#[test]
fn back_forward_to_detail_resolves_against_loaded_page() {
    let mut explorer = ready_explorer("/explorar-unas", page(&["1", "2"], 1));
    explorer.update(Message::OpenDesign(DesignId::new("1")));
    explorer.history_mut().back();
    let current = explorer.history().current();
    explorer.update(Message::Navigated(current));

    explorer.history_mut().forward();
    let current = explorer.history().current();
    assert!(explorer.update(Message::Navigated(current)).is_empty());

    assert_eq!(explorer.overlay().source(), Some(OverlaySource::InApp));
    assert!(!explorer.overlay().is_pending());
    assert_eq!(explorer.view().overlay, Some(design("1")));
}

/// Open `id` from the list, then go Back and Forward over it.
fn open_back_forward(explorer: &mut Explorer<MemoryHistory>, id: &str) {
    explorer.update(Message::OpenDesign(DesignId::new(id)));
    explorer.history_mut().back();
    let current = explorer.history().current();
    explorer.update(Message::Navigated(current));
    explorer.history_mut().forward();
    let current = explorer.history().current();
    explorer.update(Message::Navigated(current));
}

#[test]
fn close_after_forward_to_detail_goes_back() {
    let mut explorer = ready_explorer("/explorar-unas", page(&["1", "2"], 1));
    open_back_forward(&mut explorer, "1");
    assert_eq!(explorer.view().overlay, Some(design("1")));

    explorer.update(Message::CloseOverlay);
    assert!(explorer.awaiting_navigation());
    assert_eq!(
        explorer.history().entries(),
        [url("/explorar-unas"), url("/explorar-unas/1")]
    );
    assert_eq!(explorer.history().index(), 0);

    let current = explorer.history().current();
    explorer.update(Message::Navigated(current));
    assert!(!explorer.overlay().state().is_open());
    assert_eq!(explorer.applied().detail_id, None);
}

#[test]
fn forward_to_design_missing_from_page_goes_back() {
    let mut explorer = ready_explorer("/explorar-unas", page(&["1", "2"], 2));
    explorer.update(Message::OpenDesign(DesignId::new("1")));
    explorer.history_mut().back();
    let current = explorer.history().current();
    explorer.update(Message::Navigated(current));

    let request = only_fetch(&explorer.update(Message::NextPage));
    deliver(&mut explorer, &request, page(&["3", "4"], 2));

    explorer.history_mut().forward();
    let current = explorer.history().current();
    assert!(explorer.update(Message::Navigated(current)).is_empty());

    assert!(!explorer.overlay().state().is_open());
    assert_eq!(explorer.history().len(), 2);
    assert_eq!(explorer.history().index(), 0);
    assert!(explorer.awaiting_navigation());

    let current = explorer.history().current();
    explorer.update(Message::Navigated(current));
    assert!(!explorer.awaiting_navigation());
    assert_eq!(explorer.applied().detail_id, None);
}

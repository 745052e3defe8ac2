//! Remote query coordinator.
//!
//! Owns the page cursor and the displayed [`ResultPage`]. Every change to
//! the query triple (page, filters, committed search) issues exactly one
//! [`FetchRequest`] carrying a fresh [`RequestToken`]; responses are applied
//! only when their token is the most recently issued one.

use nsc_client::DesignPage;
use nsc_model::{ActiveFilterState, CatalogQuery, FIRST_PAGE, RequestToken, ResultPage};

use crate::error::FetchFailure;

/// A listing fetch the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Token to hand back with the response.
    pub token: RequestToken,
    /// Exact query to send.
    pub query: CatalogQuery,
}

/// Where the listing currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing issued yet.
    #[default]
    Idle,
    /// The latest request is in flight.
    Loading,
    /// The latest request was applied.
    Loaded,
    /// The latest request failed. `query` is what [`QueryCoordinator::retry`]
    /// sends again.
    Failed {
        /// The query that failed.
        query: CatalogQuery,
        /// Why it failed.
        failure: FetchFailure,
    },
}

/// Result of handing a response to [`QueryCoordinator::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The page is now displayed.
    Applied,
    /// A newer request superseded this one; nothing changed.
    Stale,
    /// The requested page is past the last page; a page-1 request was
    /// issued instead.
    Repaired(FetchRequest),
    /// The request failed; the failure is now the listing status.
    Failed,
}

/// Page cursor, request tokens and the displayed page.
#[derive(Debug, Clone, Default)]
pub struct QueryCoordinator {
    page: u32,
    filters: ActiveFilterState,
    search: String,
    last_token: RequestToken,
    in_flight: Option<FetchRequest>,
    last_issued: Option<CatalogQuery>,
    displayed: Option<ResultPage>,
    status: QueryStatus,
}

impl QueryCoordinator {
    /// A coordinator on page 1 that has issued nothing.
    pub fn new() -> Self {
        Self {
            page: FIRST_PAGE,
            ..Self::default()
        }
    }

    /// Current page cursor.
    pub fn page(&self) -> u32 {
        self.page.max(FIRST_PAGE)
    }

    /// The query the current cursor, filters and term describe.
    pub fn current_query(&self) -> CatalogQuery {
        CatalogQuery {
            page: self.page(),
            filters: self.filters.clone(),
            search: self.search.clone(),
        }
    }

    /// The page on screen, if any.
    pub fn displayed(&self) -> Option<&ResultPage> {
        self.displayed.as_ref()
    }

    /// Listing status.
    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The most recently issued request, until its response is applied.
    pub fn in_flight(&self) -> Option<&FetchRequest> {
        self.in_flight.as_ref()
    }

    /// Token of the most recently issued request.
    pub fn latest_token(&self) -> RequestToken {
        self.last_token
    }

    /// Last known page count, from the displayed page.
    pub fn total_pages(&self) -> Option<u32> {
        self.displayed.as_ref().map(|page| page.total_pages)
    }

    /// Bring filters and the committed term up to date.
    ///
    /// A change to either resets the page to 1 before the request is
    /// issued. Returns `None` when the resulting query was already issued.
    pub fn sync(&mut self, filters: &ActiveFilterState, search: &str) -> Option<FetchRequest> {
        if self.filters != *filters || self.search != search {
            tracing::debug!(
                selected = filters.selection_count(),
                %search,
                "Listing selection changed, resetting page"
            );
            self.filters = filters.clone();
            self.search = search.to_string();
            self.page = FIRST_PAGE;
        }
        self.issue_if_changed()
    }

    /// Move to `page`; filters and term are untouched.
    pub fn set_page(&mut self, page: u32) -> Option<FetchRequest> {
        self.page = page.max(FIRST_PAGE);
        self.issue_if_changed()
    }

    /// Move one page forward, if the last known page count allows it.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        let page = self.page();
        match self.total_pages() {
            Some(total) if page < total => self.set_page(page + 1),
            _ => None,
        }
    }

    /// Move one page back, if not on the first page.
    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        let page = self.page();
        if page > FIRST_PAGE {
            self.set_page(page - 1)
        } else {
            None
        }
    }

    /// Re-issue the query that failed, unchanged.
    ///
    /// Returns `None` unless the listing is in the failed state.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let QueryStatus::Failed { query, .. } = &self.status else {
            return None;
        };
        let query = query.clone();
        tracing::info!(page = query.page, "Retrying failed listing fetch");
        self.page = query.page;
        self.filters = query.filters.clone();
        self.search = query.search.clone();
        Some(self.issue(query))
    }

    /// Apply a response.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<DesignPage, FetchFailure>,
    ) -> ApplyOutcome {
        let Some(request) = self.in_flight.take_if(|request| request.token == token) else {
            tracing::debug!(%token, latest = %self.last_token, "Dropping stale listing response");
            return ApplyOutcome::Stale;
        };

        match result {
            Ok(page) if request.query.page > FIRST_PAGE && request.query.page > page.total_pages => {
                tracing::info!(
                    requested = request.query.page,
                    total_pages = page.total_pages,
                    "Requested page is past the end, repairing to page 1"
                );
                self.page = FIRST_PAGE;
                ApplyOutcome::Repaired(self.issue(request.query.with_page(FIRST_PAGE)))
            }
            Ok(page) => {
                tracing::debug!(
                    %token,
                    items = page.designs.len(),
                    total_pages = page.total_pages,
                    "Applied listing page"
                );
                self.displayed = Some(ResultPage {
                    items: page.designs,
                    total_pages: page.total_pages,
                    token,
                });
                self.status = QueryStatus::Loaded;
                ApplyOutcome::Applied
            }
            Err(failure) => {
                tracing::warn!(%token, detail = %failure.detail, "Listing fetch failed");
                self.status = QueryStatus::Failed {
                    query: request.query,
                    failure,
                };
                ApplyOutcome::Failed
            }
        }
    }

    fn issue_if_changed(&mut self) -> Option<FetchRequest> {
        let query = self.current_query();
        if self.last_issued.as_ref() == Some(&query) {
            return None;
        }
        Some(self.issue(query))
    }

    fn issue(&mut self, query: CatalogQuery) -> FetchRequest {
        self.last_token = self.last_token.next();
        let request = FetchRequest {
            token: self.last_token,
            query,
        };
        tracing::debug!(token = %request.token, page = request.query.page, "Issuing listing fetch");
        self.last_issued = Some(request.query.clone());
        self.in_flight = Some(request.clone());
        self.status = QueryStatus::Loading;
        request
    }
}

//! Catalog exploration engine for the nail-salon storefront.
//!
//! Keeps a multi-category filter selection, a debounced search, a paginated
//! remote listing and a deep-linkable detail overlay consistent with the
//! browser URL and history stack.
//!
//! Built on the Elm architecture: [`Explorer::update`] takes a [`Message`]
//! and returns the [`Effect`]s to perform; [`ExplorerRuntime`] performs them
//! on tokio.
//!
//! # Module Organization
//!
//! - [`route`]: The `/explorar-unas[/{id}]?query` URL surface
//! - [`taxonomy`]: Server categories adapted into filter categories
//! - [`codec`]: Filter selection to and from the query string
//! - [`debounce`]: Raw keystrokes to a committed search term
//! - [`coordinator`]: Paginated fetches, stale-response drop, page repair
//! - [`overlay`]: Detail overlay routing and history writes
//! - [`tag`]: Tag shortcut that restarts the exploration from one pair
//! - [`history`]: History stack abstraction
//! - [`explorer`]: The state machine tying it together
//! - [`view`]: View model for renderers
//! - [`runtime`]: tokio host
//! - [`settings`], [`logging`]: Ambient configuration

pub mod codec;
pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod explorer;
pub mod history;
pub mod logging;
pub mod message;
pub mod overlay;
pub mod route;
pub mod runtime;
pub mod settings;
pub mod tag;
pub mod taxonomy;
pub mod view;

pub use codec::{AppliedState, derive_state};
pub use coordinator::{ApplyOutcome, FetchRequest, QueryCoordinator, QueryStatus};
pub use debounce::{DebounceTicket, SearchDebouncer};
pub use error::{ExplorerError, FetchFailure, Result};
pub use explorer::Explorer;
pub use history::{History, MemoryHistory, NavigationKind};
pub use message::{Effect, Message};
pub use overlay::{OverlayRouter, OverlaySource, OverlayState};
pub use route::{CatalogUrl, LISTING_PATH};
pub use runtime::ExplorerRuntime;
pub use settings::ExplorerSettings;
pub use tag::TagShortcut;
pub use taxonomy::{Taxonomy, TaxonomyState};
pub use view::{ExplorerView, FilterChip, FilterPanel, ListingView, SearchView};

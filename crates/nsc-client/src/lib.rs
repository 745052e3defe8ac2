//! Backend client for the nail-salon catalog.
//!
//! The backend exposes two read endpoints:
//!
//! - `GET /categorias` - the filter taxonomy (parent categories with
//!   subcategories, each with an `activo` flag)
//! - `GET /disenios?page&limit&search&{filterKey}=slug...` - paginated designs
//!
//! # Architecture
//!
//! - [`CatalogClient`] - reqwest-based implementation
//! - [`CatalogBackend`] - trait seam so the explorer runtime can be driven by
//!   a fake backend in tests
//! - [`types`] - wire DTOs and their conversion into `nsc_model` types
//!
//! # Example
//!
//! ```no_run
//! use nsc_client::{CatalogClient, ClientSettings};
//! use nsc_model::{ActiveFilterState, CatalogQuery};
//!
//! async fn first_page() -> nsc_client::Result<()> {
//!     let client = CatalogClient::new(&ClientSettings::default())?;
//!     let taxonomy = client.fetch_taxonomy().await?;
//!     println!("{} categories", taxonomy.len());
//!
//!     let query = CatalogQuery {
//!         page: 1,
//!         filters: ActiveFilterState::default(),
//!         search: String::new(),
//!     };
//!     let page = client.fetch_designs(&query).await?;
//!     println!("{} designs, {} pages", page.designs.len(), page.total_pages);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use backend::CatalogBackend;
pub use client::{CatalogClient, DESIGNS_ENDPOINT, TAXONOMY_ENDPOINT};
pub use config::ClientSettings;
pub use error::{ClientError, Result};
pub use types::{CategoryDto, DesignPage, SubcategoryDto};

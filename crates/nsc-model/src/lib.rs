//! Data model for the nail-salon catalog explorer.
//!
//! This crate holds the plain types shared by the backend client and the
//! exploration engine. Nothing here performs I/O or owns behavior beyond
//! small, value-level helpers.
//!
//! # Module Organization
//!
//! - [`filter`]: Filter taxonomy (categories/options) and the active selection
//! - [`design`]: Catalog items ("designs") and their card tags
//! - [`query`]: Query triple, request tokens and result pages
//! - [`slug`]: URL-safe slugs for category keys and option values

pub mod design;
pub mod filter;
pub mod query;
pub mod slug;

pub use design::{Design, DesignId, DesignTag};
pub use filter::{ActiveFilterState, FilterCategory, FilterOption};
pub use query::{CatalogQuery, FIRST_PAGE, RequestToken, ResultPage};
pub use slug::slugify;

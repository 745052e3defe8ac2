//! Backend seam used by the explorer runtime.

use std::future::Future;

use nsc_model::CatalogQuery;

use crate::client::CatalogClient;
use crate::error::Result;
use crate::types::{CategoryDto, DesignPage};

/// The two reads the explorer needs from the backend.
///
/// Both calls are idempotent reads; callers may issue them concurrently and
/// ignore results they no longer need.
pub trait CatalogBackend: Send + Sync + 'static {
    /// `GET /categorias`.
    fn fetch_taxonomy(&self) -> impl Future<Output = Result<Vec<CategoryDto>>> + Send;

    /// `GET /disenios` for one query.
    fn fetch_designs(&self, query: &CatalogQuery)
    -> impl Future<Output = Result<DesignPage>> + Send;
}

impl CatalogBackend for CatalogClient {
    fn fetch_taxonomy(&self) -> impl Future<Output = Result<Vec<CategoryDto>>> + Send {
        CatalogClient::fetch_taxonomy(self)
    }

    fn fetch_designs(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<DesignPage>> + Send {
        CatalogClient::fetch_designs(self, query)
    }
}

//! HTTP client for the catalog backend.

use std::time::Duration;

use nsc_model::CatalogQuery;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientSettings;
use crate::error::{ClientError, Result};
use crate::types::{CategoryDto, DesignPage, DesignPageDto};

/// Taxonomy endpoint, relative to the base URL.
pub const TAXONOMY_ENDPOINT: &str = "categorias";

/// Listing endpoint, relative to the base URL.
pub const DESIGNS_ENDPOINT: &str = "disenios";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("nsc-explorer/", env!("CARGO_PKG_VERSION"));

/// Client for `GET /categorias` and `GET /disenios`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    page_limit: u32,
}

impl CatalogClient {
    /// Creates a new client from settings.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let base_url = settings.parsed_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ClientError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            page_limit: settings.page_limit.max(1),
        })
    }

    /// Page size sent with every listing request.
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// URL of the taxonomy endpoint.
    pub fn taxonomy_url(&self) -> Result<Url> {
        Ok(self.base_url.join(TAXONOMY_ENDPOINT)?)
    }

    /// URL of the listing endpoint for a query.
    ///
    /// Parameters are `page`, `limit`, `search`, then one `{key}=slug` pair
    /// per selected option. Repeated keys are sent as-is; how the backend
    /// combines them is its own contract.
    pub fn designs_url(&self, query: &CatalogQuery) -> Result<Url> {
        let mut url = self.base_url.join(DESIGNS_ENDPOINT)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("page", &query.page.to_string())
                .append_pair("limit", &self.page_limit.to_string())
                .append_pair("search", &query.search);
            for (key, slug) in query.filters.pairs() {
                pairs.append_pair(key, slug);
            }
        }
        Ok(url)
    }

    /// Fetches the raw taxonomy.
    pub async fn fetch_taxonomy(&self) -> Result<Vec<CategoryDto>> {
        let url = self.taxonomy_url()?;
        tracing::debug!("Fetching taxonomy from {}", url);
        self.get_json(url).await
    }

    /// Fetches one page of designs.
    pub async fn fetch_designs(&self, query: &CatalogQuery) -> Result<DesignPage> {
        let url = self.designs_url(query)?;
        tracing::debug!(page = query.page, "Fetching designs from {}", url);
        let dto: DesignPageDto = self.get_json(url).await?;
        Ok(dto.into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Catalog backend returned an error");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

//! The client-owned URL surface of the catalog.
//!
//! ```text
//! /explorar-unas?{filterKey}=slug&{filterKey}=slug2...     listing
//! /explorar-unas/{designId}?{same query}                    detail overlay open
//! ```
//!
//! [`CatalogUrl`] keeps the query as an ordered list of raw pairs rather
//! than a filter map: parameters that are not part of the taxonomy (or not
//! yet known because the taxonomy is still loading) must survive a filter
//! toggle untouched.

use std::fmt;
use std::str::FromStr;

use nsc_model::DesignId;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::{Url, form_urlencoded};

use crate::error::{ExplorerError, Result};

/// Path of the catalog listing.
pub const LISTING_PATH: &str = "/explorar-unas";

/// Origin used to resolve relative inputs; never rendered.
const PARSE_BASE: &str = "http://catalog.invalid/";

/// Characters escaped inside the detail-id path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A parsed catalog URL: optional detail id plus ordered query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CatalogUrl {
    detail_id: Option<DesignId>,
    params: Vec<(String, String)>,
}

impl CatalogUrl {
    /// The bare listing: no query, no detail id.
    pub fn listing() -> Self {
        Self::default()
    }

    /// Build from parts.
    pub fn from_parts(detail_id: Option<DesignId>, params: Vec<(String, String)>) -> Self {
        Self { detail_id, params }
    }

    /// Parse a path-and-query string (`/explorar-unas/12?color=rojo`).
    ///
    /// Absolute URLs are accepted; their origin is ignored. Fragments are
    /// dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let base = Url::parse(PARSE_BASE).map_err(|e| ExplorerError::InvalidUrl {
            input: PARSE_BASE.to_string(),
            reason: e.to_string(),
        })?;
        let url = Url::options()
            .base_url(Some(&base))
            .parse(input)
            .map_err(|e| ExplorerError::InvalidUrl {
                input: input.to_string(),
                reason: e.to_string(),
            })?;

        let detail_id = parse_detail_segment(url.path())
            .ok_or_else(|| ExplorerError::ForeignRoute(url.path().to_string()))?;

        let params = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        Ok(Self { detail_id, params })
    }

    /// Id in the detail path segment, if any.
    pub fn detail_id(&self) -> Option<&DesignId> {
        self.detail_id.as_ref()
    }

    /// All query pairs, in URL order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// All values for `key`, in URL order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` appears at all (even with an empty value).
    pub fn has_key(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    /// Whether the exact pair appears.
    pub fn has_pair(&self, key: &str, value: &str) -> bool {
        self.params.iter().any(|(k, v)| k == key && v == value)
    }

    /// Same query, with the detail id set.
    #[must_use]
    pub fn with_detail(&self, id: DesignId) -> Self {
        Self {
            detail_id: Some(id),
            params: self.params.clone(),
        }
    }

    /// Same query, without the detail id.
    #[must_use]
    pub fn without_detail(&self) -> Self {
        Self {
            detail_id: None,
            params: self.params.clone(),
        }
    }

    /// Same detail id, with a different query.
    #[must_use]
    pub fn with_params(&self, params: Vec<(String, String)>) -> Self {
        Self {
            detail_id: self.detail_id.clone(),
            params,
        }
    }

    /// Rendered path, including the encoded detail segment.
    pub fn path(&self) -> String {
        match &self.detail_id {
            Some(id) => format!(
                "{}/{}",
                LISTING_PATH,
                utf8_percent_encode(id.as_str(), SEGMENT)
            ),
            None => LISTING_PATH.to_string(),
        }
    }

    /// Rendered query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl fmt::Display for CatalogUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        if !self.params.is_empty() {
            write!(f, "?{}", self.query_string())?;
        }
        Ok(())
    }
}

impl FromStr for CatalogUrl {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// `Some(None)` for the listing, `Some(Some(id))` for a detail path, `None`
/// for anything outside the catalog.
fn parse_detail_segment(path: &str) -> Option<Option<DesignId>> {
    let rest = path.strip_prefix(LISTING_PATH)?;
    let rest = match rest {
        "" | "/" => return Some(None),
        other => other.strip_prefix('/')?,
    };
    let segment = rest.strip_suffix('/').unwrap_or(rest);
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    Some(Some(DesignId::new(decoded.into_owned())))
}

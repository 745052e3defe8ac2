//! Catalog items ("designs").

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a design as it appears in the detail URL segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignId(String);

impl DesignId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DesignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DesignId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DesignId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A clickable tag on a result card, pointing at one taxonomy option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignTag {
    /// Taxonomy category key.
    pub category_key: String,
    /// Option slug within the category.
    pub option_slug: String,
    /// Display label.
    pub label: String,
}

/// A catalog item returned by the paginated search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// Identifier used in the detail URL.
    pub id: DesignId,
    /// Display name.
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Tags linking back into the filter taxonomy.
    pub tags: Vec<DesignTag>,
}

//! Tag shortcut dispatcher.
//!
//! A tag on a result card starts a fresh, narrower exploration: the whole
//! filter selection is replaced by that one pair, the search term is
//! cleared and the overlay closes. Compare [`codec::toggle`], which refines
//! the current selection instead.
//!
//! [`codec::toggle`]: crate::codec::toggle

use nsc_model::DesignTag;

use crate::debounce::SearchDebouncer;
use crate::history::History;
use crate::overlay::OverlayRouter;
use crate::route::CatalogUrl;

/// A clicked `(category, option)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagShortcut {
    /// Category key.
    pub key: String,
    /// Option slug.
    pub slug: String,
}

impl TagShortcut {
    /// Shortcut for a raw pair.
    pub fn new(key: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slug: slug.into(),
        }
    }

    /// Listing URL selecting only this pair.
    pub fn url(&self) -> CatalogUrl {
        CatalogUrl::from_parts(None, vec![(self.key.clone(), self.slug.clone())])
    }

    /// Replace the exploration with this pair.
    ///
    /// Writes the new listing URL over the current entry, clears the search
    /// term (cancelling any pending keystroke) and closes the overlay without
    /// going back, since the URL written here already drops the design id.
    /// Returns the URL written; the caller re-derives state from it and
    /// resets the page.
    pub fn dispatch<H: History>(
        &self,
        history: &mut H,
        debouncer: &mut SearchDebouncer,
        overlay: &mut OverlayRouter,
    ) -> CatalogUrl {
        let url = self.url();
        tracing::debug!(key = %self.key, slug = %self.slug, "Tag shortcut");
        history.replace(&url);
        debouncer.reset("");
        overlay.dismiss();
        url
    }
}

impl From<&DesignTag> for TagShortcut {
    fn from(tag: &DesignTag) -> Self {
        Self::new(&tag.category_key, &tag.option_slug)
    }
}

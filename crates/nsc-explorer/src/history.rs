//! Browser history abstraction.
//!
//! The history stack is one global mutable resource. The explorer only ever
//! touches it through [`History`]: the detail overlay router pushes one
//! entry when a design is opened from the list and pops it (with a real
//! Back) when closed; filter writes replace the current entry. Nothing else
//! pushes, so leaving the catalog never takes more than one Back press per
//! opened design.

use crate::route::CatalogUrl;

/// How a URL write affects the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Add a new entry on top of the current one.
    Push,
    /// Overwrite the current entry.
    Replace,
}

/// Access to the browser history stack.
///
/// `back` is asynchronous in a browser: the resulting location arrives later
/// as a `popstate`, which hosts forward to the explorer as
/// [`Message::Navigated`](crate::Message::Navigated). Implementations must
/// not report the new location from `back` itself.
pub trait History {
    /// The URL of the current entry.
    fn current(&self) -> CatalogUrl;

    /// Add a new entry and make it current.
    fn push(&mut self, url: &CatalogUrl);

    /// Overwrite the current entry.
    fn replace(&mut self, url: &CatalogUrl);

    /// Go back one entry.
    fn back(&mut self);

    /// The URL of the entry behind the current one, when the host can see
    /// it. Hosts that cannot inspect the stack report `None`.
    fn previous(&self) -> Option<CatalogUrl> {
        None
    }

    /// Write `url` with the given navigation kind.
    fn navigate(&mut self, url: &CatalogUrl, kind: NavigationKind) {
        match kind {
            NavigationKind::Push => self.push(url),
            NavigationKind::Replace => self.replace(url),
        }
    }
}

/// In-memory history stack for tests and headless hosts.
///
/// Behaves like a browser session: pushing discards any forward entries,
/// `back` at the first entry is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<CatalogUrl>,
    index: usize,
}

impl MemoryHistory {
    /// Start a session at `initial`.
    pub fn new(initial: CatalogUrl) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Start a session with existing entries; the last one is current.
    pub fn with_entries(entries: Vec<CatalogUrl>) -> Self {
        let entries = if entries.is_empty() {
            vec![CatalogUrl::listing()]
        } else {
            entries
        };
        Self {
            index: entries.len() - 1,
            entries,
        }
    }

    /// Go forward one entry, if any.
    pub fn forward(&mut self) {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
        }
    }

    /// Whether there is an entry behind the current one.
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Number of entries in the session.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a session has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the current entry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[CatalogUrl] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(CatalogUrl::listing())
    }
}

impl History for MemoryHistory {
    fn current(&self) -> CatalogUrl {
        self.entries[self.index].clone()
    }

    fn push(&mut self, url: &CatalogUrl) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.clone());
        self.index += 1;
    }

    fn replace(&mut self, url: &CatalogUrl) {
        self.entries[self.index] = url.clone();
    }

    fn back(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    fn previous(&self) -> Option<CatalogUrl> {
        let index = self.index.checked_sub(1)?;
        self.entries.get(index).cloned()
    }
}

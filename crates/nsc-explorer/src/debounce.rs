//! Search debouncer.
//!
//! Turns a keystroke stream into a rate-limited committed search term. The
//! debouncer itself owns no timer: every keystroke returns a
//! [`DebounceTicket`] that the host schedules for the quiet window, and only
//! the ticket of the most recent keystroke can commit. Earlier tickets are
//! cancelled simply by being superseded.

use std::time::Duration;

/// Default quiet window.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(400);

/// Identifies one scheduled quiet-window timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

/// Raw and committed search term.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    /// What the input currently shows.
    raw: String,
    /// What was last sent to the backend.
    committed: String,
    /// Quiet period after the last keystroke.
    quiet: Duration,
    /// Incremented on every keystroke and reset.
    generation: u64,
    /// Ticket of the timer that may still commit.
    pending: Option<DebounceTicket>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_WINDOW)
    }
}

impl SearchDebouncer {
    /// Create a debouncer with an empty term.
    pub fn new(quiet: Duration) -> Self {
        Self {
            raw: String::new(),
            committed: String::new(),
            quiet,
            generation: 0,
            pending: None,
        }
    }

    /// The quiet window the host should wait before reporting a ticket.
    pub fn quiet_window(&self) -> Duration {
        self.quiet
    }

    /// Current input value.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Last committed value.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Whether a keystroke is waiting for its quiet window.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a keystroke.
    ///
    /// Cancels any pending timer and returns the ticket for the new one.
    pub fn input(&mut self, raw: impl Into<String>) -> DebounceTicket {
        self.raw = raw.into();
        self.generation += 1;
        let ticket = DebounceTicket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    /// The quiet window for `ticket` has elapsed.
    ///
    /// Returns the newly committed term if `ticket` is still the latest,
    /// `None` if a later keystroke superseded it. An emptied input commits
    /// the empty string like any other value.
    pub fn quiet_elapsed(&mut self, ticket: DebounceTicket) -> Option<String> {
        if self.pending != Some(ticket) {
            return None;
        }
        self.commit()
    }

    /// Commit the current input immediately (e.g., Enter pressed).
    ///
    /// Returns `None` when there is nothing new to commit.
    pub fn flush(&mut self) -> Option<String> {
        if self.pending.is_none() && normalize(&self.raw) == self.committed {
            return None;
        }
        self.commit()
    }

    /// Set both values at once and cancel any pending timer.
    pub fn reset(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.committed = normalize(&value);
        self.raw = value;
        self.generation += 1;
        self.pending = None;
    }

    fn commit(&mut self) -> Option<String> {
        self.pending = None;
        self.committed = normalize(&self.raw);
        Some(self.committed.clone())
    }
}

/// Committed terms never carry surrounding whitespace.
fn normalize(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_keystroke_commits() {
        let mut debouncer = SearchDebouncer::default();
        let first = debouncer.input("g");
        let second = debouncer.input("ge");
        let third = debouncer.input("gel");

        assert!(debouncer.is_pending());
        assert_eq!(debouncer.quiet_elapsed(first), None);
        assert_eq!(debouncer.quiet_elapsed(second), None);
        assert_eq!(debouncer.committed(), "");

        assert_eq!(debouncer.quiet_elapsed(third).as_deref(), Some("gel"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.committed(), "gel");
    }

    #[test]
    fn test_clearing_commits_empty_string() {
        let mut debouncer = SearchDebouncer::default();
        let ticket = debouncer.input("gel");
        debouncer.quiet_elapsed(ticket);

        let ticket = debouncer.input("");
        assert_eq!(debouncer.quiet_elapsed(ticket).as_deref(), Some(""));
        assert_eq!(debouncer.committed(), "");
    }

    #[test]
    fn test_ticket_fires_once() {
        let mut debouncer = SearchDebouncer::default();
        let ticket = debouncer.input("mate");
        assert!(debouncer.quiet_elapsed(ticket).is_some());
        assert!(debouncer.quiet_elapsed(ticket).is_none());
    }

    #[test]
    fn test_flush_commits_immediately() {
        let mut debouncer = SearchDebouncer::default();
        let ticket = debouncer.input("  francesa ");
        assert_eq!(debouncer.flush().as_deref(), Some("francesa"));
        assert_eq!(debouncer.raw(), "  francesa ");
        assert!(debouncer.quiet_elapsed(ticket).is_none());
        assert!(debouncer.flush().is_none());
    }

    #[test]
    fn test_reset_cancels_pending() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(50));
        let ticket = debouncer.input("chrome");
        debouncer.reset("");
        assert!(!debouncer.is_pending());
        assert!(debouncer.quiet_elapsed(ticket).is_none());
        assert_eq!(debouncer.raw(), "");
        assert_eq!(debouncer.committed(), "");
        assert_eq!(debouncer.quiet_window(), Duration::from_millis(50));
    }
}

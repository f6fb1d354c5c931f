//! Incremental reveal of the results list.
//!
//! The panel renders a window over the applied items. Scrolling to the end
//! arms a short timer; when it fires the window grows by one step.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RevealWindow {
    step: usize,
    delay: Duration,
    display_count: usize,
    next_ticket: u64,
    pending: Option<u64>,
}

impl RevealWindow {
    #[must_use]
    pub const fn new(step: usize, delay: Duration) -> Self {
        Self {
            step,
            delay,
            display_count: step,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Number of items to show out of `total`.
    #[must_use]
    pub fn visible(&self, total: usize) -> usize {
        self.display_count.min(total)
    }

    /// Shrinks back to the first step. Returns `true` if a reveal was pending.
    pub fn reset(&mut self) -> bool {
        self.display_count = self.step;
        self.pending.take().is_some()
    }

    /// Requests one more step. Returns the ticket and delay to arm, or `None`
    /// while loading, with nothing hidden, or with a reveal already pending.
    pub fn request(&mut self, total: usize, loading: bool) -> Option<(u64, Duration)> {
        if loading || self.display_count >= total || self.pending.is_some() {
            return None;
        }
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        Some((self.next_ticket, self.delay))
    }

    /// Grows the window if `ticket` is the pending one.
    pub fn elapsed(&mut self, ticket: u64) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.display_count += self.step;
        tracing::debug!(display_count = self.display_count, "results window grown");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(800);

    #[test]
    fn grows_by_step_after_timer() {
        let mut window = RevealWindow::new(10, DELAY);
        assert_eq!(window.visible(25), 10);

        let (ticket, delay) = window.request(25, false).unwrap();
        assert_eq!(delay, DELAY);
        assert!(window.request(25, false).is_none());

        assert!(window.elapsed(ticket));
        assert_eq!(window.visible(25), 20);
    }

    #[test]
    fn refuses_while_loading_or_fully_shown() {
        let mut window = RevealWindow::new(10, DELAY);
        assert!(window.request(25, true).is_none());
        assert!(window.request(10, false).is_none());
        assert!(window.request(3, false).is_none());
    }

    #[test]
    fn reset_discards_pending_reveal() {
        let mut window = RevealWindow::new(10, DELAY);
        let (ticket, _) = window.request(25, false).unwrap();

        assert!(window.reset());
        assert!(!window.elapsed(ticket));
        assert_eq!(window.visible(25), 10);
    }
}

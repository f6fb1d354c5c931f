//! Debounced text channel.
//!
//! Converts a rapidly changing text value into a single emission once input
//! has been quiet for a fixed interval. The channel owns no timer itself: each
//! [`DebouncedText::push`] hands back a ticket that the runtime arms a timer
//! for, and only the most recent ticket is honoured when its timer fires.
//! A restarted, cancelled or torn-down channel therefore never emits a stale
//! value, even if the underlying timer could not be aborted in time.

use std::time::Duration;

/// What the runtime must do with its timer after a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceStep {
    /// (Re)arm the timer for `ticket` after `delay`.
    Schedule { ticket: u64, delay: Duration },
    /// Disarm any pending timer; nothing will be emitted.
    Cancel,
}

#[derive(Debug, Clone)]
struct Pending {
    ticket: u64,
    value: String,
}

/// Rate limiter for the search box text.
#[derive(Debug, Clone)]
pub struct DebouncedText {
    quiet: Duration,
    next_ticket: u64,
    pending: Option<Pending>,
}

impl DebouncedText {
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            next_ticket: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new raw value, restarting the quiet interval.
    ///
    /// The empty value never emits; it cancels whatever was pending.
    pub fn push(&mut self, value: &str) -> DebounceStep {
        if value.is_empty() {
            self.pending = None;
            return DebounceStep::Cancel;
        }

        self.next_ticket += 1;
        self.pending = Some(Pending {
            ticket: self.next_ticket,
            value: value.to_string(),
        });

        DebounceStep::Schedule {
            ticket: self.next_ticket,
            delay: self.quiet,
        }
    }

    /// Called when the timer for `ticket` fires.
    ///
    /// Returns the stabilized value if `ticket` is still the latest one.
    pub fn elapsed(&mut self, ticket: u64) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => self.pending.take().map(|p| p.value),
            _ => {
                tracing::trace!(ticket, "ignoring stale debounce timer");
                None
            }
        }
    }

    /// Drops any pending emission. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

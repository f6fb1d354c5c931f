//! Actions representing side effects to be executed by the widget runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The runtime
//! executes them in order: timers are armed or disarmed, worker messages are
//! spawned as tasks, and alerts go to the host's alert sink.
//!
//! # Example
//!
//! ```rust
//! use skillsearch::app::{Action, TimerId, TimerKind};
//! use std::time::Duration;
//!
//! let actions = vec![Action::StartTimer {
//!     timer: TimerId { kind: TimerKind::Debounce, ticket: 1 },
//!     delay: Duration::from_millis(500),
//! }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;
use std::time::Duration;

/// Timer families. At most one timer per kind is armed at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Quiet interval of the search box.
    Debounce,
    /// Delay before growing the visible results window.
    Reveal,
}

/// A timer instance; the ticket is echoed back when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub kind: TimerKind,
    pub ticket: u64,
}

/// User-facing alert text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub text: String,
}

impl Alert {
    fn network(text: &str) -> Self {
        Self {
            title: "Network Error".to_string(),
            text: text.to_string(),
        }
    }

    #[must_use]
    pub fn results_failed() -> Self {
        Self::network("An error occurred while fetching results")
    }

    #[must_use]
    pub fn details_failed() -> Self {
        Self::network("An error occurred while fetching details")
    }

    #[must_use]
    pub fn filters_failed() -> Self {
        Self::network("An error occurred while fetching filters")
    }
}

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Arms `timer`, replacing any armed timer of the same kind.
    ///
    /// When it fires the runtime feeds `Event::TimerElapsed(timer)` back in.
    StartTimer { timer: TimerId, delay: Duration },

    /// Disarms the armed timer of this kind, if any.
    CancelTimer(TimerKind),

    /// Runs a remote call on a worker task.
    ///
    /// The response arrives later as `Event::WorkerResponse`.
    PostToWorker(WorkerMessage),

    /// Shows a blocking alert to the user.
    ShowAlert(Alert),
}

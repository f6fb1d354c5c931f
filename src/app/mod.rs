//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (which owns timers, worker tasks and
//! the host) and the domain/worker layers. It is free of I/O: every effect is
//! returned as an [`Action`].
//!
//! # Architecture
//!
//! ```text
//! Host Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Timer & Worker Responses ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`coordinator`]: Generation-tagged search lifecycle
//! - [`debounce`]: Quiet-interval text channel
//! - [`details`]: Details fetcher for the selected skill
//! - [`handler`]: Event processing and state transitions
//! - [`modal`]: Filter editor state machine and facet options
//! - [`modes`]: Panel, modal and trigger enums
//! - [`reveal`]: Incremental results window
//! - [`state`]: Central widget state and view model computation
//! - [`visibility`]: Results panel open/closed controller

pub mod actions;
pub mod coordinator;
pub mod debounce;
pub mod details;
pub mod handler;
pub mod modal;
pub mod modes;
pub mod reveal;
pub mod state;
pub mod visibility;

pub use actions::{Action, Alert, TimerId, TimerKind};
pub use coordinator::{Generation, RequestCoordinator, SearchResultSet};
pub use debounce::{DebounceStep, DebouncedText};
pub use details::{DetailsContent, DetailsFetcher};
pub use handler::{handle_event, Event};
pub use modal::{FacetOption, FilterEditor, ModalOutcome};
pub use modes::{ModalState, PanelVisibility, TriggerSource};
pub use reveal::RevealWindow;
pub use state::WidgetState;
pub use visibility::{HitTest, NoRegions, Point, Region, ResultsVisibility};

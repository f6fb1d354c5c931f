//! State machine enums shared across the application layer.
//!
//! # State Machines
//!
//! The results panel is either [`PanelVisibility::Open`] or
//! [`PanelVisibility::Closed`]. The filter editor moves through
//! [`ModalState`]:
//!
//! ```text
//! Closed ──open──► PickingFacet ──pick──► EditingFacet(kind)
//!   ▲                 ▲     │                 │    │
//!   │                 └back─┼─────────────────┘    │
//!   └───── done / close / auto-commit ─────────────┘
//! ```
//!
//! [`TriggerSource`] records which UI event caused a search; it decides both
//! the length gate and whether the results panel is forced open.

use crate::domain::FacetKind;

/// UI event category that caused a search dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerSource {
    /// Debounced text reached the coordinator. Subject to the length gate.
    TextTyped,
    /// The filter editor committed its facets.
    FilterCommitted,
    /// A category was chosen directly, outside the editor.
    CategoryPicked,
    /// A filter badge was removed.
    BadgeRemoved,
}

impl TriggerSource {
    /// Whether a search from this source opens the results panel.
    #[must_use]
    pub const fn forces_open(self) -> bool {
        matches!(self, Self::FilterCommitted | Self::CategoryPicked)
    }
}

/// Results panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelVisibility {
    Open,
    Closed,
}

/// Filter editor modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    /// Listing the facets.
    PickingFacet,
    /// Single-select list for one facet.
    EditingFacet(FacetKind),
}

impl ModalState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

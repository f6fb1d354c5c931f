//! Results panel visibility.
//!
//! The panel opens on focus and on filter-driven searches, and closes on a
//! pointer-down outside both the search input and the panel, on item
//! selection, or on blur with an empty search box. Which screen region a
//! pointer lands in is decided by the host through [`HitTest`].

use super::modes::{PanelVisibility, TriggerSource};

/// Pointer position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Widget region a pointer landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Input,
    Panel,
}

/// Resolves a pointer position to a widget region.
///
/// Returns `None` when the point is outside the widget.
pub trait HitTest: Send + Sync {
    fn hit(&self, point: Point) -> Option<Region>;
}

impl<F> HitTest for F
where
    F: Fn(Point) -> Option<Region> + Send + Sync,
{
    fn hit(&self, point: Point) -> Option<Region> {
        self(point)
    }
}

/// Hit test that never reports a region; every pointer-down is outside.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegions;

impl HitTest for NoRegions {
    fn hit(&self, _point: Point) -> Option<Region> {
        None
    }
}

/// Two-state controller for the results panel.
#[derive(Debug, Clone, Copy)]
pub struct ResultsVisibility {
    state: PanelVisibility,
}

impl Default for ResultsVisibility {
    fn default() -> Self {
        Self {
            state: PanelVisibility::Closed,
        }
    }
}

impl ResultsVisibility {
    #[must_use]
    pub const fn state(&self) -> PanelVisibility {
        self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, PanelVisibility::Open)
    }

    /// Each method returns `true` when the state changed.
    fn set(&mut self, next: PanelVisibility) -> bool {
        if self.state == next {
            return false;
        }
        tracing::debug!(from = ?self.state, to = ?next, "panel visibility changed");
        self.state = next;
        true
    }

    pub fn on_focus(&mut self) -> bool {
        self.set(PanelVisibility::Open)
    }

    /// Blur only closes when the box is blank.
    pub fn on_blur(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            self.set(PanelVisibility::Closed)
        } else {
            false
        }
    }

    pub fn on_pointer_down(&mut self, point: Point, hit_test: &dyn HitTest) -> bool {
        match hit_test.hit(point) {
            Some(_) => false,
            None => self.set(PanelVisibility::Closed),
        }
    }

    /// Selecting an item closes unconditionally, including while loading.
    pub fn on_item_selected(&mut self) -> bool {
        self.set(PanelVisibility::Closed)
    }

    pub fn on_search_dispatched(&mut self, trigger: TriggerSource) -> bool {
        if trigger.forces_open() {
            self.set(PanelVisibility::Open)
        } else {
            false
        }
    }
}

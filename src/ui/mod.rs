//! Presentation layer: view models and a plain text renderer.
//!
//! ```text
//! WidgetState → compute_viewmodel → WidgetViewModel → render_to_string → text
//! ```
//!
//! - [`viewmodel`]: Display-ready snapshots of widget state
//! - [`renderer`]: Line-oriented text rendering with match highlighting

pub mod renderer;
pub mod viewmodel;

pub use renderer::{highlight, render_to_string, HighlightStyle};
pub use viewmodel::{
    DetailsView, FacetRow, ModalView, OptionRow, PanelView, ResultRow, SkillCard, WidgetViewModel,
};

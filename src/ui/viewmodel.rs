//! View model types representing renderable widget state.
//!
//! View models are immutable snapshots computed by
//! `WidgetState::compute_viewmodel()` and consumed by the renderer or by any
//! other host. They contain no business logic, only display-ready data such
//! as the visible window of results, badge labels and highlight ranges.

use crate::domain::{Badge, FacetKind};

/// Complete widget view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetViewModel {
    /// Raw text of the search box.
    pub search_text: String,

    /// One removable badge per set facet.
    pub badges: Vec<Badge>,

    /// Results panel, `None` while closed.
    pub panel: Option<PanelView>,

    /// Filter editor, `None` while closed.
    pub modal: Option<ModalView>,

    pub details: DetailsView,
}

/// Results panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Revealed items only.
    pub rows: Vec<ResultRow>,
    pub loading: bool,
    /// A completed search returned nothing.
    pub show_no_results: bool,
    /// Items not yet revealed; the "more" indicator shows when non-zero.
    pub hidden_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// Filter editor contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    /// The facet list.
    Facets(Vec<FacetRow>),
    /// Single-select options for one facet.
    Options {
        facet: FacetKind,
        query: String,
        rows: Vec<OptionRow>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetRow {
    pub facet: FacetKind,
    pub title: &'static str,
    /// Current selection label, if the facet is set.
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub label: String,
    pub is_selected: bool,
    /// Each tuple is `(start, end)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Details panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsView {
    /// Nothing selected yet.
    Hidden,
    /// Selected but not (or not successfully) loaded.
    Placeholder { loading: bool },
    Loaded(SkillCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCard {
    pub name: String,
    pub category: String,
    /// `"$ 40 fixed cost"`.
    pub pricing: String,
    pub duration: Option<String>,
    /// `"Yes"` or `"No"`.
    pub online: &'static str,
    pub in_person: &'static str,
    pub description: String,
    pub images: Vec<String>,
}

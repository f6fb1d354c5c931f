//! Widget state and view model computation.
//!
//! [`WidgetState`] is the single owner of everything the widget remembers:
//! the search text, the facet selections and every coordinating component.
//! It is mutated only by [`handle_event`](super::handle_event) and rendered
//! through [`WidgetState::compute_viewmodel`].

use super::actions::{Action, TimerId, TimerKind};
use super::coordinator::RequestCoordinator;
use super::debounce::DebouncedText;
use super::details::{DetailsContent, DetailsFetcher};
use super::modal::FilterEditor;
use super::modes::{ModalState, TriggerSource};
use super::reveal::RevealWindow;
use super::visibility::{HitTest, ResultsVisibility};
use crate::domain::{build_query, FacetKind, FilterState};
use crate::ui::viewmodel::{
    DetailsView, FacetRow, ModalView, OptionRow, PanelView, ResultRow, SkillCard, WidgetViewModel,
};
use crate::worker::WorkerMessage;
use crate::Config;
use std::sync::Arc;
use std::time::Duration;

/// Central widget state.
pub struct WidgetState {
    /// Raw text of the search box, updated on every keystroke.
    pub text: String,

    /// Current facet selections.
    pub filters: FilterState,

    pub debounce: DebouncedText,
    pub coordinator: RequestCoordinator,
    pub visibility: ResultsVisibility,
    pub editor: FilterEditor,
    pub details: DetailsFetcher,
    pub reveal: RevealWindow,

    /// Host-supplied region lookup for click-outside.
    pub hit_test: Arc<dyn HitTest>,

    /// Set by teardown; every later event is ignored.
    pub destroyed: bool,
}

impl std::fmt::Debug for WidgetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetState")
            .field("text", &self.text)
            .field("filters", &self.filters)
            .field("generation", &self.coordinator.current_generation())
            .field("panel", &self.visibility.state())
            .field("modal", &self.editor.state())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl WidgetState {
    #[must_use]
    pub fn new(config: &Config, hit_test: Arc<dyn HitTest>) -> Self {
        Self {
            text: String::new(),
            filters: FilterState::default(),
            debounce: DebouncedText::new(Duration::from_millis(config.debounce_ms)),
            coordinator: RequestCoordinator::new(config.min_query_len),
            visibility: ResultsVisibility::default(),
            editor: FilterEditor::new(config.auto_commit),
            details: DetailsFetcher::default(),
            reveal: RevealWindow::new(
                config.reveal_step,
                Duration::from_millis(config.reveal_delay_ms),
            ),
            hit_test,
            destroyed: false,
        }
    }

    /// Builds the query from the current text and filters and hands it to
    /// the coordinator.
    ///
    /// A gated text search retires an in-flight text search. Any other
    /// dispatch supersedes the pending debounced text.
    pub fn search(&mut self, trigger: TriggerSource) -> Vec<Action> {
        let query = build_query(&self.text, &self.filters);

        let Some(generation) = self.coordinator.dispatch(&query, trigger) else {
            self.coordinator.reset_text_search();
            return vec![];
        };

        let mut actions = Vec::with_capacity(3);
        if trigger != TriggerSource::TextTyped && self.debounce.cancel() {
            actions.push(Action::CancelTimer(TimerKind::Debounce));
        }
        if self.reveal.reset() {
            actions.push(Action::CancelTimer(TimerKind::Reveal));
        }
        self.visibility.on_search_dispatched(trigger);
        actions.push(Action::PostToWorker(WorkerMessage::search(generation, query)));
        actions
    }

    /// Arms the reveal timer if more items are hidden.
    pub fn request_reveal(&mut self) -> Option<Action> {
        let total = self.coordinator.results().items.len();
        let (ticket, delay) = self.reveal.request(total, self.coordinator.is_loading())?;
        Some(Action::StartTimer {
            timer: TimerId {
                kind: TimerKind::Reveal,
                ticket,
            },
            delay,
        })
    }

    /// Computes a renderable snapshot of the widget.
    #[must_use]
    pub fn compute_viewmodel(&self) -> WidgetViewModel {
        WidgetViewModel {
            search_text: self.text.clone(),
            badges: self.filters.badges(),
            panel: self.visibility.is_open().then(|| self.compute_panel()),
            modal: self.compute_modal(),
            details: self.compute_details(),
        }
    }

    fn compute_panel(&self) -> PanelView {
        let results = self.coordinator.results();
        let visible = self.reveal.visible(results.items.len());

        PanelView {
            rows: results.items[..visible]
                .iter()
                .map(|item| ResultRow {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    image: item.image.clone(),
                })
                .collect(),
            loading: results.loading,
            show_no_results: results.is_empty_result(),
            hidden_count: results.items.len() - visible,
        }
    }

    fn compute_modal(&self) -> Option<ModalView> {
        match self.editor.state() {
            ModalState::Closed => None,
            ModalState::PickingFacet => Some(ModalView::Facets(
                FacetKind::ALL
                    .iter()
                    .map(|&facet| FacetRow {
                        facet,
                        title: facet.title(),
                        summary: self
                            .filters
                            .badges()
                            .into_iter()
                            .find(|badge| badge.facet == facet)
                            .map(|badge| badge.label),
                    })
                    .collect(),
            )),
            ModalState::EditingFacet(facet) => {
                let selected = self.filters.selected(facet);
                Some(ModalView::Options {
                    facet,
                    query: self.editor.facet_query().to_string(),
                    rows: self
                        .editor
                        .options()
                        .into_iter()
                        .map(|option| OptionRow {
                            label: option.value.label(),
                            is_selected: selected.as_ref() == Some(&option.value),
                            highlight_ranges: option.highlight_ranges,
                        })
                        .collect(),
                })
            }
        }
    }

    fn compute_details(&self) -> DetailsView {
        if self.details.selected_id().is_none() {
            return DetailsView::Hidden;
        }

        match self.details.content() {
            DetailsContent::Placeholder => DetailsView::Placeholder {
                loading: self.details.is_loading(),
            },
            DetailsContent::Loaded { detail, images } => {
                let yes_no = |flag: bool| if flag { "Yes" } else { "No" };
                DetailsView::Loaded(SkillCard {
                    name: detail.name.clone(),
                    category: detail.category.name.clone(),
                    pricing: detail.pricing_label(),
                    duration: detail.duration.clone(),
                    online: yes_no(detail.delivery_method_online),
                    in_person: yes_no(detail.delivery_method_in_person),
                    description: detail.description.clone(),
                    images: images.iter().map(|i| i.image.clone()).collect(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::visibility::NoRegions;
    use crate::domain::{Category, RateChoice, SkillDetail, SkillImage, SkillSummary};

    fn state() -> WidgetState {
        WidgetState::new(&Config::default(), Arc::new(NoRegions))
    }

    fn items(n: usize) -> Vec<SkillSummary> {
        (0..n)
            .map(|i| SkillSummary {
                id: format!("s{i}"),
                name: format!("Skill {i}"),
                image: String::new(),
            })
            .collect()
    }

    #[test]
    fn closed_panel_is_not_rendered() {
        let vm = state().compute_viewmodel();
        assert!(vm.panel.is_none());
        assert!(vm.modal.is_none());
        assert_eq!(vm.details, DetailsView::Hidden);
    }

    #[test]
    fn panel_shows_first_window_and_hidden_count() {
        let mut state = state();
        state.text = "plumbing".into();
        state.visibility.on_focus();
        state.search(TriggerSource::TextTyped);
        let generation = state.coordinator.current_generation();
        state.coordinator.apply_success(generation, items(25));

        let panel = state.compute_viewmodel().panel.unwrap();
        assert_eq!(panel.rows.len(), 10);
        assert_eq!(panel.hidden_count, 15);
        assert!(!panel.show_no_results);
    }

    #[test]
    fn facet_list_summarizes_set_facets() {
        let mut state = state();
        state.filters.category = Some(Category::new("c1", "Plumbing"));
        state.filters.rate = Some(RateChoice::Any);
        state.editor.open();

        let Some(ModalView::Facets(rows)) = state.compute_viewmodel().modal else {
            panic!("expected facet list");
        };
        let summaries: Vec<Option<String>> = rows.into_iter().map(|r| r.summary).collect();
        assert_eq!(
            summaries,
            vec![
                None,
                Some("Category: Plumbing".to_string()),
                Some("Rate: any".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn option_rows_mark_current_selection() {
        let mut state = state();
        state.filters.rate = Some(RateChoice::Hourly);
        state.editor.open();
        state.editor.pick_facet(FacetKind::Rate).unwrap();

        let Some(ModalView::Options { rows, .. }) = state.compute_viewmodel().modal else {
            panic!("expected options");
        };
        let selected: Vec<&str> = rows
            .iter()
            .filter(|r| r.is_selected)
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(selected, vec!["Hourly"]);
    }

    #[test]
    fn loaded_details_render_yes_no_and_spaced_rate() {
        let mut state = state();
        let ticket = state.details.select("s1").unwrap();
        assert_eq!(
            state.compute_viewmodel().details,
            DetailsView::Placeholder { loading: true }
        );

        let detail = SkillDetail {
            name: "Tiling".into(),
            rate: "fixed_cost".into(),
            amount: Some(serde_json::Number::from(40u64)),
            delivery_method_online: false,
            delivery_method_in_person: true,
            ..Default::default()
        };
        state.details.apply_loaded(
            ticket,
            detail,
            vec![SkillImage {
                image: "https://img/1.png".into(),
            }],
        );

        let DetailsView::Loaded(card) = state.compute_viewmodel().details else {
            panic!("expected loaded details");
        };
        assert_eq!(card.pricing, "$ 40 fixed cost");
        assert_eq!((card.online, card.in_person), ("No", "Yes"));
        assert_eq!(card.images, vec!["https://img/1.png"]);
    }
}

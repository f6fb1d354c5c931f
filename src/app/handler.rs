//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, timer
//! expirations and worker responses, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the host, the timers or a worker task
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via the components owned by [`WidgetState`]
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Search box**: `Focus`, `Blur`, `TextChanged`, `PointerDown`
//! - **Results**: `SelectResult`, `RevealMore`, `RemoveBadge`, `PickCategory`
//! - **Filter editor**: `OpenFilters`, `PickFacet`, `FacetQueryChanged`,
//!   `SelectFacetOption`, `FilterBack`, `ResetFilters`, `CommitFilters`, `CloseFilters`
//! - **System**: `TimerElapsed`, `WorkerResponse`, `Teardown`
//!
//! # Example
//!
//! ```rust
//! use skillsearch::app::{handle_event, Event, NoRegions, WidgetState};
//! use skillsearch::Config;
//! use std::sync::Arc;
//!
//! let mut state = WidgetState::new(&Config::default(), Arc::new(NoRegions));
//! let (render, actions) = handle_event(&mut state, &Event::Focus)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), skillsearch::SkillSearchError>(())
//! ```

use super::actions::{Action, Alert, TimerId, TimerKind};
use super::debounce::DebounceStep;
use super::modal::ModalOutcome;
use super::modes::TriggerSource;
use super::visibility::Point;
use super::WidgetState;
use crate::domain::error::Result;
use crate::domain::{Category, FacetKind, FacetValue};
use crate::worker::{Catalog, WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The search box gained focus.
    Focus,
    /// The search box lost focus.
    Blur,
    /// The search box text changed.
    TextChanged(String),
    /// A timer armed through [`Action::StartTimer`] fired.
    TimerElapsed(TimerId),
    /// Pointer pressed anywhere on screen.
    PointerDown(Point),
    /// A result row was chosen.
    SelectResult(String),
    /// The results list was scrolled to its end.
    RevealMore,
    /// A filter badge was removed.
    RemoveBadge(FacetKind),
    /// A category was chosen outside the filter editor.
    PickCategory(Category),

    OpenFilters,
    PickFacet(FacetKind),
    FacetQueryChanged(String),
    SelectFacetOption(FacetValue),
    FilterBack,
    ResetFilters,
    /// The editor's Done button.
    CommitFilters,
    CloseFilters,

    /// Wraps a response from a worker task.
    WorkerResponse(WorkerResponse),

    /// The widget is being destroyed.
    Teardown,
}

/// Processes an event, mutates widget state, and returns actions to execute.
///
/// The boolean reports whether the host should re-render.
///
/// # Errors
///
/// Returns [`SkillSearchError::Modal`](crate::SkillSearchError::Modal) when a
/// filter editor event does not apply to the editor's current state. State is
/// left unchanged in that case.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut WidgetState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.destroyed {
        tracing::debug!("widget torn down, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::Focus => Ok((state.visibility.on_focus(), vec![])),
        Event::Blur => Ok((state.visibility.on_blur(&state.text), vec![])),
        Event::TextChanged(text) => {
            state.text.clone_from(text);

            match state.debounce.push(text) {
                DebounceStep::Schedule { ticket, delay } => Ok((
                    true,
                    vec![Action::StartTimer {
                        timer: TimerId {
                            kind: TimerKind::Debounce,
                            ticket,
                        },
                        delay,
                    }],
                )),
                DebounceStep::Cancel => {
                    tracing::debug!("search box emptied");
                    state.coordinator.reset_text_search();
                    Ok((true, vec![Action::CancelTimer(TimerKind::Debounce)]))
                }
            }
        }
        Event::TimerElapsed(TimerId {
            kind: TimerKind::Debounce,
            ticket,
        }) => match state.debounce.elapsed(*ticket) {
            Some(text) => {
                tracing::debug!(text = %text, "debounced text emitted");
                Ok((true, state.search(TriggerSource::TextTyped)))
            }
            None => Ok((false, vec![])),
        },
        Event::TimerElapsed(TimerId {
            kind: TimerKind::Reveal,
            ticket,
        }) => Ok((state.reveal.elapsed(*ticket), vec![])),
        Event::PointerDown(point) => Ok((
            state
                .visibility
                .on_pointer_down(*point, state.hit_test.as_ref()),
            vec![],
        )),
        Event::SelectResult(id) => {
            state.visibility.on_item_selected();

            let actions = state
                .details
                .select(id)
                .map(|ticket| Action::PostToWorker(WorkerMessage::fetch_details(id.clone(), ticket)))
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        Event::RevealMore => Ok((false, state.request_reveal().into_iter().collect())),
        Event::RemoveBadge(facet) => {
            state.filters.clear(*facet);
            Ok((true, state.search(TriggerSource::BadgeRemoved)))
        }
        Event::PickCategory(category) => {
            state.filters.category = Some(category.clone());
            Ok((true, state.search(TriggerSource::CategoryPicked)))
        }

        Event::OpenFilters => {
            if !state.editor.open() {
                return Ok((false, vec![]));
            }
            let actions = state
                .editor
                .take_catalog_requests()
                .into_iter()
                .map(|catalog| {
                    Action::PostToWorker(match catalog {
                        Catalog::Categories => WorkerMessage::load_categories(),
                        Catalog::Locations => WorkerMessage::load_locations(),
                    })
                })
                .collect();
            Ok((true, actions))
        }
        Event::PickFacet(facet) => {
            state.editor.pick_facet(*facet)?;
            Ok((true, vec![]))
        }
        Event::FacetQueryChanged(query) => {
            state.editor.set_facet_query(query)?;
            Ok((true, vec![]))
        }
        Event::SelectFacetOption(value) => {
            match state.editor.select(value, &mut state.filters)? {
                ModalOutcome::Committed => Ok((true, state.search(TriggerSource::FilterCommitted))),
                ModalOutcome::Changed => Ok((true, vec![])),
            }
        }
        Event::FilterBack => Ok((state.editor.back(), vec![])),
        Event::ResetFilters => {
            state.editor.reset(&mut state.filters)?;
            Ok((true, vec![]))
        }
        Event::CommitFilters => {
            state.editor.commit()?;
            Ok((true, state.search(TriggerSource::FilterCommitted)))
        }
        Event::CloseFilters => Ok((state.editor.close(), vec![])),

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),

        Event::Teardown => {
            tracing::debug!("tearing down widget");
            state.destroyed = true;
            state.debounce.cancel();
            state.reveal.reset();
            Ok((
                false,
                vec![
                    Action::CancelTimer(TimerKind::Debounce),
                    Action::CancelTimer(TimerKind::Reveal),
                ],
            ))
        }
    }
}

fn handle_worker_response(state: &mut WidgetState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::SearchCompleted { generation, items } => {
            if state.coordinator.apply_success(*generation, items.clone()) {
                let cancel_reveal = state.reveal.reset();
                let actions = if cancel_reveal {
                    vec![Action::CancelTimer(TimerKind::Reveal)]
                } else {
                    vec![]
                };
                (true, actions)
            } else {
                (false, vec![])
            }
        }
        WorkerResponse::SearchFailed { generation, error } => {
            let current = *generation == state.coordinator.current_generation();
            if state.coordinator.apply_failure(*generation, *error) {
                (true, vec![Action::ShowAlert(Alert::results_failed())])
            } else {
                (current, vec![])
            }
        }
        WorkerResponse::DetailsLoaded {
            ticket,
            detail,
            images,
            ..
        } => (
            state
                .details
                .apply_loaded(*ticket, detail.clone(), images.clone()),
            vec![],
        ),
        WorkerResponse::DetailsFailed { ticket, error, .. } => {
            if state.details.apply_failed(*ticket, *error) {
                (true, vec![Action::ShowAlert(Alert::details_failed())])
            } else {
                (false, vec![])
            }
        }
        WorkerResponse::CategoriesLoaded { categories } => {
            state.editor.set_categories(categories.clone());
            (state.editor.state().is_open(), vec![])
        }
        WorkerResponse::LocationsLoaded { locations } => {
            state.editor.set_locations(locations.clone());
            (state.editor.state().is_open(), vec![])
        }
        WorkerResponse::CatalogFailed { catalog, error } => {
            tracing::debug!(?catalog, %error, "facet catalog failed");
            if state.editor.catalog_failed(*catalog) {
                (false, vec![Action::ShowAlert(Alert::filters_failed())])
            } else {
                (false, vec![])
            }
        }
    }
}

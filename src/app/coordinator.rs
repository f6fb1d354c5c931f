//! Request lifecycle for remote searches.
//!
//! The [`RequestCoordinator`] guarantees that at most one search result is
//! authoritative at a time and that it belongs to the most recently
//! dispatched query. Every dispatch takes a new [`Generation`]; responses
//! tagged with any other generation are dropped without touching visible
//! state. This holds for any number of concurrent in-flight requests and is
//! the only ordering guarantee the widget relies on. Transport calls are
//! never cancelled for correctness.
//!
//! ```text
//!   dispatch(q1) ─► g1 ──────────────── response(g1) ─► dropped
//!   dispatch(q2) ─► g2 ── response(g2) ─► applied
//! ```

use super::modes::TriggerSource;
use crate::domain::{FetchErrorKind, SearchQuery, SkillSummary};
use serde::{Deserialize, Serialize};

/// Monotonic tag attached to each dispatched search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Result state of the current generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultSet {
    pub generation: Generation,
    pub items: Vec<SkillSummary>,
    pub loading: bool,
    pub error: Option<FetchErrorKind>,
    /// Set once a response for `generation` has been applied.
    pub completed: bool,
}

impl SearchResultSet {
    /// Whether the "no results" affordance should render.
    ///
    /// Only a completed request with zero items qualifies; an idle widget
    /// that never searched does not.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.completed && !self.loading && self.error.is_none() && self.items.is_empty()
    }
}

/// Owns the request generation and the authoritative result set.
#[derive(Debug, Clone)]
pub struct RequestCoordinator {
    current: Generation,
    results: SearchResultSet,
    min_text_len: usize,
    /// Generation whose failure has already been surfaced.
    reported: Option<Generation>,
    /// Trigger that started the current generation, `None` when idle.
    origin: Option<TriggerSource>,
}

impl RequestCoordinator {
    /// Creates an idle coordinator gating text searches at `min_text_len`
    /// trimmed characters.
    #[must_use]
    pub fn new(min_text_len: usize) -> Self {
        Self {
            current: Generation::default(),
            results: SearchResultSet::default(),
            min_text_len,
            reported: None,
            origin: None,
        }
    }

    #[must_use]
    pub const fn current_generation(&self) -> Generation {
        self.current
    }

    #[must_use]
    pub const fn results(&self) -> &SearchResultSet {
        &self.results
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.results.loading
    }

    /// Whether `query` may be dispatched for `trigger`.
    ///
    /// Text searches need the minimum trimmed length; every other trigger is
    /// sufficient intent on its own, including with empty text.
    #[must_use]
    pub fn admits(&self, query: &SearchQuery, trigger: TriggerSource) -> bool {
        match trigger {
            TriggerSource::TextTyped => query.trimmed_len() >= self.min_text_len,
            TriggerSource::FilterCommitted
            | TriggerSource::CategoryPicked
            | TriggerSource::BadgeRemoved => true,
        }
    }

    /// Starts a new generation for `query`.
    ///
    /// Returns the generation the remote call must be tagged with, or `None`
    /// when the trigger's gate rejects the query (state is left untouched).
    pub fn dispatch(&mut self, query: &SearchQuery, trigger: TriggerSource) -> Option<Generation> {
        if !self.admits(query, trigger) {
            tracing::debug!(
                ?trigger,
                text_len = query.trimmed_len(),
                min = self.min_text_len,
                "search gated"
            );
            return None;
        }

        self.current = self.current.next();
        self.origin = Some(trigger);
        self.results = SearchResultSet {
            generation: self.current,
            items: Vec::new(),
            loading: true,
            error: None,
            completed: false,
        };

        tracing::debug!(generation = %self.current, ?trigger, text = %query.text, "search dispatched");
        Some(self.current)
    }

    /// Applies a successful response. Returns `false` if it was superseded.
    pub fn apply_success(&mut self, generation: Generation, items: Vec<SkillSummary>) -> bool {
        if generation != self.current {
            tracing::debug!(%generation, current = %self.current, "dropping superseded results");
            return false;
        }

        tracing::debug!(%generation, item_count = items.len(), "results applied");
        self.results.items = items;
        self.results.loading = false;
        self.results.error = None;
        self.results.completed = true;
        true
    }

    /// Applies a failed response.
    ///
    /// Returns `true` exactly once per current generation, meaning the caller
    /// should surface an alert. Superseded failures return `false` and leave
    /// state untouched.
    pub fn apply_failure(&mut self, generation: Generation, error: FetchErrorKind) -> bool {
        if generation != self.current {
            tracing::debug!(%generation, current = %self.current, %error, "dropping superseded failure");
            return false;
        }

        self.results.loading = false;
        self.results.error = Some(error);

        if self.reported == Some(generation) {
            return false;
        }
        self.reported = Some(generation);
        tracing::debug!(%generation, %error, "search failed");
        true
    }

    /// Retires any in-flight generation and returns to idle.
    ///
    /// Used when text falls below the gate: whatever was in flight no longer
    /// matches the input, so its response must not land.
    pub fn reset(&mut self) {
        if self.results.loading || self.results.completed || self.results.error.is_some() {
            self.current = self.current.next();
            tracing::debug!(generation = %self.current, "results reset");
        }
        self.origin = None;
        self.results = SearchResultSet {
            generation: self.current,
            ..SearchResultSet::default()
        };
    }

    /// Resets only if the current generation came from typed text.
    ///
    /// Filter, category and badge searches do not depend on the box text,
    /// so short or emptied text leaves them authoritative. Returns whether a
    /// reset happened.
    pub fn reset_text_search(&mut self) -> bool {
        match self.origin {
            None | Some(TriggerSource::TextTyped) => {
                self.reset();
                true
            }
            Some(trigger) => {
                tracing::debug!(?trigger, generation = %self.current, "keeping non-text search");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_query, Category, FilterState};

    fn hit(id: &str) -> SkillSummary {
        SkillSummary {
            id: id.to_string(),
            name: format!("skill {id}"),
            image: String::new(),
        }
    }

    fn text(t: &str) -> SearchQuery {
        build_query(t, &FilterState::default())
    }

    #[test]
    fn short_text_never_dispatches() {
        let mut coordinator = RequestCoordinator::new(3);
        for t in ["", " ", "pl", "  pl  ", "a\t", "né"] {
            assert_eq!(coordinator.dispatch(&text(t), TriggerSource::TextTyped), None, "{t:?}");
        }
        assert_eq!(coordinator.current_generation(), Generation::default());
        assert_eq!(coordinator.results(), &SearchResultSet::default());
    }

    #[test]
    fn filter_commit_dispatches_with_empty_text() {
        let mut coordinator = RequestCoordinator::new(3);
        let filters = FilterState {
            category: Some(Category::new("plumbing-id", "Plumbing")),
            ..Default::default()
        };
        let query = build_query("", &filters);

        let generation = coordinator.dispatch(&query, TriggerSource::FilterCommitted);
        assert_eq!(generation, Some(Generation::new(1)));
        assert!(coordinator.is_loading());
        assert_eq!(query.text, "");
        assert_eq!(query.category_id, "plumbing-id");

        for trigger in [TriggerSource::CategoryPicked, TriggerSource::BadgeRemoved] {
            assert!(coordinator.dispatch(&text(""), trigger).is_some());
        }
    }

    #[test]
    fn late_response_for_older_generation_is_dropped() {
        let mut coordinator = RequestCoordinator::new(3);
        let g1 = coordinator.dispatch(&text("plu"), TriggerSource::TextTyped).unwrap();
        let g2 = coordinator.dispatch(&text("plum"), TriggerSource::TextTyped).unwrap();
        assert!(g1 < g2);

        assert!(coordinator.apply_success(g2, vec![hit("b")]));
        let visible = coordinator.results().clone();

        assert!(!coordinator.apply_success(g1, vec![hit("a")]));
        assert!(!coordinator.apply_failure(g1, FetchErrorKind::Network));
        assert_eq!(coordinator.results(), &visible);
    }

    #[test]
    fn stale_response_does_not_clear_current_loading() {
        let mut coordinator = RequestCoordinator::new(3);
        let mut generations = Vec::new();
        for t in ["plu", "plum", "plumb", "plumbe"] {
            generations.push(coordinator.dispatch(&text(t), TriggerSource::TextTyped).unwrap());
        }
        let latest = *generations.last().unwrap();

        // Older responses arrive in arbitrary order while the latest is in flight.
        for &g in generations[..3].iter().rev() {
            assert!(!coordinator.apply_success(g, vec![hit("x")]));
            assert!(coordinator.is_loading());
        }

        assert!(coordinator.apply_success(latest, vec![hit("y")]));
        assert!(!coordinator.is_loading());
        assert_eq!(coordinator.results().items, vec![hit("y")]);
    }

    #[test]
    fn failure_is_reported_once_and_clears_loading() {
        let mut coordinator = RequestCoordinator::new(3);
        let g = coordinator.dispatch(&text("tile"), TriggerSource::TextTyped).unwrap();

        assert!(coordinator.apply_failure(g, FetchErrorKind::Timeout));
        assert!(!coordinator.apply_failure(g, FetchErrorKind::Timeout));
        assert!(!coordinator.is_loading());
        assert_eq!(coordinator.results().error, Some(FetchErrorKind::Timeout));
        assert!(!coordinator.results().is_empty_result());
    }

    #[test]
    fn no_results_affordance_only_after_completion() {
        let mut coordinator = RequestCoordinator::new(3);
        assert!(!coordinator.results().is_empty_result());

        let g = coordinator.dispatch(&text("zzz"), TriggerSource::TextTyped).unwrap();
        assert!(!coordinator.results().is_empty_result());

        coordinator.apply_success(g, vec![]);
        assert!(coordinator.results().is_empty_result());
    }

    #[test]
    fn reset_retires_in_flight_generation() {
        let mut coordinator = RequestCoordinator::new(3);
        let g = coordinator.dispatch(&text("plum"), TriggerSource::TextTyped).unwrap();

        coordinator.reset();
        assert!(!coordinator.is_loading());
        assert!(coordinator.current_generation() > g);

        assert!(!coordinator.apply_success(g, vec![hit("late")]));
        assert!(coordinator.results().items.is_empty());
    }

    #[test]
    fn short_text_keeps_category_search() {
        let mut coordinator = RequestCoordinator::new(3);
        let g = coordinator
            .dispatch(&text(""), TriggerSource::CategoryPicked)
            .unwrap();

        assert!(!coordinator.reset_text_search());
        assert_eq!(coordinator.current_generation(), g);
        assert!(coordinator.apply_success(g, vec![hit("c")]));

        coordinator.dispatch(&text("plum"), TriggerSource::TextTyped).unwrap();
        assert!(coordinator.reset_text_search());
        assert!(!coordinator.is_loading());
    }

    #[test]
    fn reset_when_idle_keeps_generation() {
        let mut coordinator = RequestCoordinator::new(3);
        coordinator.reset();
        assert_eq!(coordinator.current_generation(), Generation::default());
    }
}

//! Filter editor modal.
//!
//! [`FilterEditor`] drives the [`ModalState`] machine and produces the option
//! rows for the facet being edited. It writes straight into the caller's
//! [`FilterState`]; whether a selection also commits is decided by the
//! `auto_commit` flag.
//!
//! Location and category options come from remote catalogs that are loaded
//! the first time the modal opens. A failed load leaves the slot missing so
//! that reopening the modal retries it.

use super::modes::ModalState;
use crate::domain::error::{Result, SkillSearchError};
use crate::domain::{
    Category, DeliveryChoice, FacetKind, FacetValue, FilterState, Location, RateChoice,
};
use crate::worker::Catalog;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Result of a selection or commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Filter state changed; the modal stays open.
    Changed,
    /// The modal closed and a filter-committed search is due.
    Committed,
}

/// One selectable row in a facet editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub value: FacetValue,
    /// Character ranges of the label matched by the facet query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CatalogSlot<T> {
    Missing,
    Loading,
    Ready(Vec<T>),
}

impl<T> CatalogSlot<T> {
    fn items(&self) -> &[T] {
        match self {
            Self::Ready(items) => items,
            Self::Missing | Self::Loading => &[],
        }
    }
}

/// State machine and option source for the filter modal.
#[derive(Debug, Clone)]
pub struct FilterEditor {
    state: ModalState,
    auto_commit: bool,
    facet_query: String,
    categories: CatalogSlot<Category>,
    locations: CatalogSlot<Location>,
    /// A catalog failure was already surfaced since the last open.
    catalog_alerted: bool,
}

impl FilterEditor {
    #[must_use]
    pub fn new(auto_commit: bool) -> Self {
        Self {
            state: ModalState::Closed,
            auto_commit,
            facet_query: String::new(),
            categories: CatalogSlot::Missing,
            locations: CatalogSlot::Missing,
            catalog_alerted: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ModalState {
        self.state
    }

    #[must_use]
    pub fn facet_query(&self) -> &str {
        &self.facet_query
    }

    fn require_open(&self, operation: &str) -> Result<()> {
        if self.state.is_open() {
            Ok(())
        } else {
            Err(SkillSearchError::Modal(format!("{operation} while closed")))
        }
    }

    /// Opens the modal on the facet list. Returns `false` if already open.
    pub fn open(&mut self) -> bool {
        if self.state.is_open() {
            return false;
        }
        self.state = ModalState::PickingFacet;
        self.facet_query.clear();
        self.catalog_alerted = false;
        true
    }

    /// Catalogs that still need loading; marks them as in flight.
    pub fn take_catalog_requests(&mut self) -> Vec<Catalog> {
        let mut requests = Vec::new();
        if self.categories == CatalogSlot::Missing {
            self.categories = CatalogSlot::Loading;
            requests.push(Catalog::Categories);
        }
        if self.locations == CatalogSlot::Missing {
            self.locations = CatalogSlot::Loading;
            requests.push(Catalog::Locations);
        }
        requests
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        tracing::debug!(count = categories.len(), "categories loaded");
        self.categories = CatalogSlot::Ready(categories);
    }

    pub fn set_locations(&mut self, locations: Vec<Location>) {
        tracing::debug!(count = locations.len(), "locations loaded");
        self.locations = CatalogSlot::Ready(locations);
    }

    /// Marks a catalog as missing again so the next open retries it.
    ///
    /// Returns `true` for the first failure since the modal opened.
    pub fn catalog_failed(&mut self, catalog: Catalog) -> bool {
        match catalog {
            Catalog::Categories => self.categories = CatalogSlot::Missing,
            Catalog::Locations => self.locations = CatalogSlot::Missing,
        }
        !std::mem::replace(&mut self.catalog_alerted, true)
    }

    /// Enters the editor for `facet`.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Modal`] if the modal is closed.
    pub fn pick_facet(&mut self, facet: FacetKind) -> Result<()> {
        self.require_open("pick facet")?;
        self.state = ModalState::EditingFacet(facet);
        self.facet_query.clear();
        Ok(())
    }

    /// Returns from a facet editor to the facet list.
    pub fn back(&mut self) -> bool {
        if matches!(self.state, ModalState::EditingFacet(_)) {
            self.state = ModalState::PickingFacet;
            self.facet_query.clear();
            true
        } else {
            false
        }
    }

    /// Narrows the options of the facet being edited.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Modal`] outside a facet editor.
    pub fn set_facet_query(&mut self, query: &str) -> Result<()> {
        if !matches!(self.state, ModalState::EditingFacet(_)) {
            return Err(SkillSearchError::Modal(
                "facet query outside a facet editor".to_string(),
            ));
        }
        self.facet_query = query.to_string();
        Ok(())
    }

    /// Writes `value` into `filters`, committing when `auto_commit` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Modal`] unless the editor for the value's
    /// facet is showing.
    pub fn select(&mut self, value: &FacetValue, filters: &mut FilterState) -> Result<ModalOutcome> {
        let facet = value.kind();
        if self.state != ModalState::EditingFacet(facet) {
            return Err(SkillSearchError::Modal(format!(
                "{} option selected in {:?}",
                facet.title(),
                self.state
            )));
        }

        filters.apply(value);
        tracing::debug!(facet = facet.title(), option = %value.label(), "facet option selected");

        if self.auto_commit {
            self.commit()
        } else {
            Ok(ModalOutcome::Changed)
        }
    }

    /// Clears every facet and returns to the facet list without dispatching.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Modal`] if the modal is closed.
    pub fn reset(&mut self, filters: &mut FilterState) -> Result<()> {
        self.require_open("reset")?;
        filters.reset();
        self.state = ModalState::PickingFacet;
        self.facet_query.clear();
        Ok(())
    }

    /// Closes the modal and requests a filter-committed search.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Modal`] if the modal is closed.
    pub fn commit(&mut self) -> Result<ModalOutcome> {
        self.require_open("commit")?;
        self.state = ModalState::Closed;
        self.facet_query.clear();
        Ok(ModalOutcome::Committed)
    }

    /// Closes without dispatching. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state = ModalState::Closed;
        self.facet_query.clear();
        true
    }

    /// Rows for the facet currently being edited, "Any" first.
    #[must_use]
    pub fn options(&self) -> Vec<FacetOption> {
        let ModalState::EditingFacet(facet) = self.state else {
            return Vec::new();
        };

        let values: Vec<FacetValue> = match facet {
            FacetKind::Location => std::iter::once(FacetValue::Location(None))
                .chain(
                    self.locations
                        .items()
                        .iter()
                        .cloned()
                        .map(|l| FacetValue::Location(Some(l))),
                )
                .collect(),
            FacetKind::Category => std::iter::once(FacetValue::Category(None))
                .chain(
                    self.categories
                        .items()
                        .iter()
                        .cloned()
                        .map(|c| FacetValue::Category(Some(c))),
                )
                .collect(),
            FacetKind::Rate => [RateChoice::Any, RateChoice::FixedCost, RateChoice::Hourly]
                .into_iter()
                .map(FacetValue::Rate)
                .collect(),
            FacetKind::Delivery => [
                DeliveryChoice::Any,
                DeliveryChoice::Online,
                DeliveryChoice::InPerson,
            ]
            .into_iter()
            .map(FacetValue::Delivery)
            .collect(),
        };

        let query = self.facet_query.trim();
        if query.is_empty() {
            return values
                .into_iter()
                .map(|value| FacetOption {
                    value,
                    highlight_ranges: Vec::new(),
                })
                .collect();
        }

        let matcher = SkimMatcherV2::default();
        values
            .into_iter()
            .enumerate()
            .filter_map(|(idx, value)| {
                // The "Any" row stays reachable while narrowing.
                if idx == 0 {
                    return Some(FacetOption {
                        value,
                        highlight_ranges: Vec::new(),
                    });
                }
                let (_score, indices) = matcher.fuzzy_indices(&value.label(), query)?;
                Some(FacetOption {
                    value,
                    highlight_ranges: coalesce_ranges(&indices),
                })
            })
            .collect()
    }
}

/// Folds sorted character indices into half-open `(start, end)` runs.
fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plumbing() -> Category {
        Category::new("plumbing-id", "Plumbing")
    }

    fn editing(facet: FacetKind, auto_commit: bool) -> FilterEditor {
        let mut editor = FilterEditor::new(auto_commit);
        editor.open();
        editor.pick_facet(facet).unwrap();
        editor
    }

    #[test]
    fn select_with_auto_commit_closes_and_commits() {
        let mut filters = FilterState::default();
        let mut editor = editing(FacetKind::Category, true);

        let outcome = editor
            .select(&FacetValue::Category(Some(plumbing())), &mut filters)
            .unwrap();

        assert_eq!(outcome, ModalOutcome::Committed);
        assert_eq!(editor.state(), ModalState::Closed);
        assert_eq!(filters.category, Some(plumbing()));
    }

    #[test]
    fn select_without_auto_commit_stays_open() {
        let mut filters = FilterState::default();
        let mut editor = editing(FacetKind::Rate, false);

        let outcome = editor
            .select(&FacetValue::Rate(RateChoice::Hourly), &mut filters)
            .unwrap();

        assert_eq!(outcome, ModalOutcome::Changed);
        assert_eq!(editor.state(), ModalState::EditingFacet(FacetKind::Rate));
        assert_eq!(filters.rate, Some(RateChoice::Hourly));

        assert!(editor.back());
        assert_eq!(editor.commit().unwrap(), ModalOutcome::Committed);
        assert_eq!(editor.state(), ModalState::Closed);
    }

    #[test]
    fn wrong_facet_selection_is_rejected() {
        let mut filters = FilterState::default();
        let mut editor = editing(FacetKind::Rate, true);

        let err = editor
            .select(&FacetValue::Delivery(DeliveryChoice::Online), &mut filters)
            .unwrap_err();
        assert!(matches!(err, SkillSearchError::Modal(_)));
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn reset_clears_filters_and_returns_to_facet_list() {
        let mut filters = FilterState {
            category: Some(plumbing()),
            rate: Some(RateChoice::Any),
            delivery_online: true,
            ..Default::default()
        };
        let mut editor = editing(FacetKind::Delivery, true);

        editor.reset(&mut filters).unwrap();
        assert_eq!(filters, FilterState::default());
        assert_eq!(editor.state(), ModalState::PickingFacet);
    }

    #[test]
    fn close_and_commit_require_open_modal() {
        let mut editor = FilterEditor::new(true);
        assert!(!editor.close());
        assert!(editor.commit().is_err());
        assert!(editor.pick_facet(FacetKind::Rate).is_err());

        editor.open();
        assert!(editor.close());
    }

    #[test]
    fn catalogs_requested_once_and_retried_after_failure() {
        let mut editor = FilterEditor::new(true);
        assert_eq!(
            editor.take_catalog_requests(),
            vec![Catalog::Categories, Catalog::Locations]
        );
        assert!(editor.take_catalog_requests().is_empty());

        editor.set_categories(vec![plumbing()]);
        assert!(editor.catalog_failed(Catalog::Locations));
        assert_eq!(editor.take_catalog_requests(), vec![Catalog::Locations]);
        assert!(!editor.catalog_failed(Catalog::Locations));

        editor.open();
        assert!(editor.catalog_failed(Catalog::Locations));
    }

    #[test]
    fn fixed_facets_list_any_first() {
        let editor = editing(FacetKind::Delivery, true);
        let labels: Vec<String> = editor.options().iter().map(|o| o.value.label()).collect();
        assert_eq!(labels, vec!["Any", "Online", "In person"]);
    }

    #[test]
    fn facet_query_narrows_catalog_with_highlights() {
        let mut editor = FilterEditor::new(true);
        editor.set_locations(vec![
            Location::new("Nelson", "New Zealand"),
            Location::new("Auckland", "New Zealand"),
            Location::new("Sydney", "Australia"),
        ]);
        editor.open();
        editor.pick_facet(FacetKind::Location).unwrap();
        editor.set_facet_query("nels").unwrap();

        let options = editor.options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, FacetValue::Location(None));
        assert_eq!(
            options[1].value,
            FacetValue::Location(Some(Location::new("Nelson", "New Zealand")))
        );
        assert_eq!(options[1].highlight_ranges, vec![(0, 4)]);
    }

    #[test]
    fn coalesces_consecutive_indices() {
        assert_eq!(coalesce_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce_ranges(&[]).is_empty());
    }
}

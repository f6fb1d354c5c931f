//! Canonical search request payload.
//!
//! [`build_query`] merges the current text and [`FilterState`] into a
//! [`SearchQuery`]. It is pure: no I/O, no hidden state. Unset facets map to
//! the backend's "no constraint" form (`""`, `false` or `null`) so the server
//! never filters on an absent value.

use super::filter::{FilterState, Location};
use serde::{Deserialize, Serialize};

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub text: String,
    pub category_id: String,
    pub delivery_in_person: bool,
    pub delivery_online: bool,
    pub rate: String,
    pub location: Option<Location>,
}

impl SearchQuery {
    /// Number of characters in the trimmed text.
    #[must_use]
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Builds the request for `text` under `filters`.
///
/// # Examples
///
/// ```
/// use skillsearch::domain::{build_query, Category, FilterState};
///
/// let filters = FilterState {
///     category: Some(Category::new("c-7", "Plumbing")),
///     ..Default::default()
/// };
/// let query = build_query("", &filters);
/// assert_eq!(query.category_id, "c-7");
/// assert_eq!(query.rate, "");
/// assert!(query.location.is_none());
/// ```
#[must_use]
pub fn build_query(text: &str, filters: &FilterState) -> SearchQuery {
    SearchQuery {
        text: text.to_string(),
        category_id: filters
            .category
            .as_ref()
            .map(|category| category.id.clone())
            .unwrap_or_default(),
        delivery_in_person: filters.delivery_in_person,
        delivery_online: filters.delivery_online,
        rate: filters
            .rate
            .map(|rate| rate.wire_value().to_string())
            .unwrap_or_default(),
        location: filters.location.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{Category, RateChoice};

    #[test]
    fn unset_facets_serialize_as_no_constraint() {
        let query = build_query("plumber", &FilterState::default());
        let json = serde_json::to_value(&query).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "text": "plumber",
                "categoryId": "",
                "deliveryInPerson": false,
                "deliveryOnline": false,
                "rate": "",
                "location": null,
            })
        );
    }

    #[test]
    fn unset_and_any_rate_build_identical_queries() {
        let unset = FilterState::default();
        let any = FilterState {
            rate: Some(RateChoice::Any),
            ..Default::default()
        };

        // The two states differ (badge vs. no badge) but constrain nothing.
        assert_ne!(unset, any);
        assert_eq!(build_query("tile", &unset), build_query("tile", &any));
    }

    #[test]
    fn set_facets_flow_into_the_query() {
        let filters = FilterState {
            location: Some(Location::new("Wellington", "New Zealand")),
            category: Some(Category::new("c-2", "Gardening")),
            rate: Some(RateChoice::FixedCost),
            delivery_online: false,
            delivery_in_person: true,
        };

        let query = build_query("hedge", &filters);
        assert_eq!(query.category_id, "c-2");
        assert_eq!(query.rate, "fixed_cost");
        assert!(query.delivery_in_person);
        assert_eq!(query.location, Some(Location::new("Wellington", "New Zealand")));
    }

    #[test]
    fn trimmed_len_counts_characters() {
        let query = build_query("  né ", &FilterState::default());
        assert_eq!(query.trimmed_len(), 2);
    }
}

//! Details fetcher for the selected skill.
//!
//! Selecting a new id retires whatever was cached, bumps a ticket and asks
//! for the detail record and its images together. A response only lands if
//! its ticket is the latest; a failure of either call leaves the placeholder.

use crate::domain::{FetchErrorKind, SkillDetail, SkillImage};

/// What the details panel currently holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailsContent {
    #[default]
    Placeholder,
    Loaded {
        detail: SkillDetail,
        images: Vec<SkillImage>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DetailsFetcher {
    selected: Option<String>,
    ticket: u64,
    loading: bool,
    content: DetailsContent,
}

impl DetailsFetcher {
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn content(&self) -> &DetailsContent {
        &self.content
    }

    /// Selects `id`. Returns the ticket to fetch with, or `None` when `id`
    /// is already selected.
    pub fn select(&mut self, id: &str) -> Option<u64> {
        if self.selected.as_deref() == Some(id) {
            tracing::debug!(skill_id = %id, "skill already selected");
            return None;
        }

        self.selected = Some(id.to_string());
        self.content = DetailsContent::Placeholder;
        self.ticket += 1;
        self.loading = true;

        tracing::debug!(skill_id = %id, ticket = self.ticket, "details requested");
        Some(self.ticket)
    }

    /// Applies a loaded response. Returns `false` if its ticket is stale.
    pub fn apply_loaded(&mut self, ticket: u64, detail: SkillDetail, images: Vec<SkillImage>) -> bool {
        if ticket != self.ticket {
            tracing::debug!(ticket, current = self.ticket, "dropping stale details");
            return false;
        }
        self.loading = false;
        self.content = DetailsContent::Loaded { detail, images };
        true
    }

    /// Applies a failure. Returns `true` when the caller should alert.
    pub fn apply_failed(&mut self, ticket: u64, error: FetchErrorKind) -> bool {
        if ticket != self.ticket || !self.loading {
            tracing::debug!(ticket, current = self.ticket, %error, "dropping stale details failure");
            return false;
        }
        self.loading = false;
        self.content = DetailsContent::Placeholder;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(name: &str) -> SkillDetail {
        SkillDetail {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn reselecting_same_id_does_not_refetch() {
        let mut details = DetailsFetcher::default();
        assert_eq!(details.select("s1"), Some(1));
        assert_eq!(details.select("s1"), None);
        assert_eq!(details.select("s2"), Some(2));
    }

    #[test]
    fn stale_ticket_is_dropped() {
        let mut details = DetailsFetcher::default();
        let old = details.select("s1").unwrap();
        let new = details.select("s2").unwrap();

        assert!(!details.apply_loaded(old, detail("old"), vec![]));
        assert_eq!(details.content(), &DetailsContent::Placeholder);
        assert!(details.is_loading());

        assert!(details.apply_loaded(new, detail("new"), vec![]));
        assert!(matches!(details.content(), DetailsContent::Loaded { detail, .. } if detail.name == "new"));
    }

    #[test]
    fn failure_keeps_placeholder_and_alerts_once() {
        let mut details = DetailsFetcher::default();
        let ticket = details.select("s1").unwrap();

        assert!(details.apply_failed(ticket, FetchErrorKind::Network));
        assert!(!details.apply_failed(ticket, FetchErrorKind::Network));
        assert_eq!(details.content(), &DetailsContent::Placeholder);
        assert!(!details.is_loading());
    }

    #[test]
    fn new_selection_discards_loaded_content() {
        let mut details = DetailsFetcher::default();
        let ticket = details.select("s1").unwrap();
        details.apply_loaded(ticket, detail("one"), vec![]);

        details.select("s2");
        assert_eq!(details.content(), &DetailsContent::Placeholder);
        assert_eq!(details.selected_id(), Some("s2"));
    }
}

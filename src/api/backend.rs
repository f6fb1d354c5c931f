//! Search API abstraction.
//!
//! The [`SkillApi`] trait is the seam between the widget and the JSON search
//! service. The worker only talks to this trait, which keeps the coordination
//! logic testable against in-memory fakes.

use crate::domain::error::Result;
use crate::domain::{Category, Location, SearchQuery, SkillDetail, SkillImage, SkillSummary};
use async_trait::async_trait;

/// Read-only operations offered by the skill search service.
///
/// Implementations must map non-2xx statuses to
/// [`SkillSearchError::Http`](crate::SkillSearchError::Http), malformed bodies
/// to [`SkillSearchError::Parse`](crate::SkillSearchError::Parse) and exceeded
/// ceilings to [`SkillSearchError::Timeout`](crate::SkillSearchError::Timeout).
/// None of the calls are retried.
///
/// # Implementations
///
/// - [`HttpSkillApi`](super::HttpSkillApi): reqwest client (default)
#[async_trait]
pub trait SkillApi: Send + Sync {
    /// `POST /search`. Results keep the server's order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport, status, decode or timeout failure.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SkillSummary>>;

    /// `GET /getOne?id=<id>`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport, status, decode or timeout failure.
    async fn skill(&self, id: &str) -> Result<SkillDetail>;

    /// `GET /getSkillImages?id=<id>`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport, status, decode or timeout failure.
    async fn skill_images(&self, id: &str) -> Result<Vec<SkillImage>>;

    /// `GET /getCategories`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport, status, decode or timeout failure.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// `GET /getLocations`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport, status, decode or timeout failure.
    async fn locations(&self) -> Result<Vec<Location>>;
}

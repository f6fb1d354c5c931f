//! reqwest-backed implementation of [`SkillApi`].
//!
//! One pooled client is built per widget with the configured request ceiling;
//! status checks happen before decoding so a 5xx page never surfaces as a
//! parse error.

use crate::api::backend::SkillApi;
use crate::domain::error::{Result, SkillSearchError};
use crate::domain::{Category, Location, SearchQuery, SkillDetail, SkillImage, SkillSummary};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the skill search service.
#[derive(Debug, Clone)]
pub struct HttpSkillApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSkillApi {
    /// Creates a client rooted at `base_url` with a per-request `timeout`.
    ///
    /// Trailing slashes on the base URL are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SkillSearchError::Config`] if the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("skillsearch/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SkillSearchError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Sends `request` and decodes a JSON body, mapping failures onto the
    /// crate's error taxonomy.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(operation, error = %e, "request failed");
            SkillSearchError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(operation, status = status.as_u16(), "non-success status");
            return Err(SkillSearchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(SkillSearchError::from)?;
        let decoded = serde_json::from_slice(&body)?;

        tracing::trace!(operation, bytes = body.len(), "response decoded");
        Ok(decoded)
    }
}

#[async_trait]
impl SkillApi for HttpSkillApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SkillSummary>> {
        let request = self.client.post(self.endpoint("search")).json(query);
        self.fetch_json("search", request).await
    }

    async fn skill(&self, id: &str) -> Result<SkillDetail> {
        let request = self.client.get(self.endpoint("getOne")).query(&[("id", id)]);
        self.fetch_json("get skill", request).await
    }

    async fn skill_images(&self, id: &str) -> Result<Vec<SkillImage>> {
        let request = self
            .client
            .get(self.endpoint("getSkillImages"))
            .query(&[("id", id)]);
        self.fetch_json("get skill images", request).await
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let request = self.client.get(self.endpoint("getCategories"));
        self.fetch_json("get categories", request).await
    }

    async fn locations(&self) -> Result<Vec<Location>> {
        let request = self.client.get(self.endpoint("getLocations"));
        self.fetch_json("get locations", request).await
    }
}

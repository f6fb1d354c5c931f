//! Worker implementation for remote calls.
//!
//! A [`SearchWorker`] turns one [`WorkerMessage`] into one [`WorkerResponse`].
//! It never decides whether a response is still relevant; that belongs to the
//! coordinator and details fetcher on the event-loop side, which compare the
//! generation or ticket echoed back here.

use crate::api::SkillApi;
use crate::domain::error::SkillSearchError;
use crate::worker::messages::{Catalog, WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tracing::Instrument;

/// Executes worker messages against a [`SkillApi`].
#[derive(Clone)]
pub struct SearchWorker {
    api: Arc<dyn SkillApi>,
}

impl std::fmt::Debug for SearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWorker").finish_non_exhaustive()
    }
}

impl SearchWorker {
    #[must_use]
    pub fn new(api: Arc<dyn SkillApi>) -> Self {
        Self { api }
    }

    /// Logs a failed call and returns its kind.
    fn log_failure(operation: &str, error: &SkillSearchError) -> crate::domain::FetchErrorKind {
        tracing::debug!(operation = operation, error = %error, "remote call failed");
        error.kind()
    }

    /// Rebuilds the parent OpenTelemetry context carried by `message`.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes a message and returns the response to feed back into the
    /// widget.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = {
            let _context_guard = Self::attach_parent_trace_context(&message);
            tracing::debug_span!("worker_handle_message", message_type = ?message)
        };

        self.dispatch(message).instrument(span).await
    }

    async fn dispatch(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::Search {
                generation, query, ..
            } => match self.api.search(&query).await {
                Ok(items) => {
                    tracing::debug!(%generation, item_count = items.len(), "search completed");
                    WorkerResponse::SearchCompleted { generation, items }
                }
                Err(e) => WorkerResponse::SearchFailed {
                    generation,
                    error: Self::log_failure("search", &e),
                },
            },

            WorkerMessage::FetchDetails { id, ticket, .. } => {
                let detail = self.api.skill(&id);
                let images = self.api.skill_images(&id);

                match futures_util::future::try_join(detail, images).await {
                    Ok((detail, images)) => {
                        tracing::debug!(skill_id = %id, image_count = images.len(), "details loaded");
                        WorkerResponse::DetailsLoaded {
                            id,
                            ticket,
                            detail,
                            images,
                        }
                    }
                    Err(e) => WorkerResponse::DetailsFailed {
                        id,
                        ticket,
                        error: Self::log_failure("fetch details", &e),
                    },
                }
            }

            WorkerMessage::LoadCategories { .. } => match self.api.categories().await {
                Ok(categories) => WorkerResponse::CategoriesLoaded { categories },
                Err(e) => WorkerResponse::CatalogFailed {
                    catalog: Catalog::Categories,
                    error: Self::log_failure("load categories", &e),
                },
            },

            WorkerMessage::LoadLocations { .. } => match self.api.locations().await {
                Ok(locations) => WorkerResponse::LocationsLoaded { locations },
                Err(e) => WorkerResponse::CatalogFailed {
                    catalog: Catalog::Locations,
                    error: Self::log_failure("load locations", &e),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::coordinator::Generation;
    use crate::domain::error::Result;
    use crate::domain::{
        build_query, Category, FetchErrorKind, FilterState, Location, SearchQuery, SkillDetail,
        SkillImage, SkillSummary,
    };
    use async_trait::async_trait;

    struct ImagesDown;

    #[async_trait]
    impl SkillApi for ImagesDown {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<SkillSummary>> {
            Ok(vec![SkillSummary {
                id: "s1".into(),
                name: query.text.clone(),
                image: String::new(),
            }])
        }
        async fn skill(&self, _id: &str) -> Result<SkillDetail> {
            Ok(SkillDetail::default())
        }
        async fn skill_images(&self, _id: &str) -> Result<Vec<SkillImage>> {
            Err(SkillSearchError::Http { status: 502 })
        }
        async fn categories(&self) -> Result<Vec<Category>> {
            Err(SkillSearchError::Timeout)
        }
        async fn locations(&self) -> Result<Vec<Location>> {
            Ok(vec![Location::new("Nelson", "New Zealand")])
        }
    }

    fn worker() -> SearchWorker {
        SearchWorker::new(Arc::new(ImagesDown))
    }

    #[tokio::test]
    async fn search_echoes_generation() {
        let generation = Generation::new(7);
        let message = WorkerMessage::search(generation, build_query("plu", &FilterState::default()));

        match worker().handle_message(message).await {
            WorkerResponse::SearchCompleted { generation: g, items } => {
                assert_eq!(g, generation);
                assert_eq!(items[0].name, "plu");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn details_fail_when_either_call_fails() {
        let response = worker()
            .handle_message(WorkerMessage::fetch_details("s1".into(), 3))
            .await;

        assert_eq!(
            response,
            WorkerResponse::DetailsFailed {
                id: "s1".into(),
                ticket: 3,
                error: FetchErrorKind::Network,
            }
        );
    }

    #[tokio::test]
    async fn catalog_failures_name_the_catalog() {
        let response = worker().handle_message(WorkerMessage::load_categories()).await;
        assert_eq!(
            response,
            WorkerResponse::CatalogFailed {
                catalog: Catalog::Categories,
                error: FetchErrorKind::Timeout,
            }
        );

        let response = worker().handle_message(WorkerMessage::load_locations()).await;
        assert!(matches!(response, WorkerResponse::LocationsLoaded { .. }));
    }
}

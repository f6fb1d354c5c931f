//! Worker message types for UI ↔ network communication.
//!
//! This module defines the request and response protocol between the widget's
//! event loop and the tasks that perform remote calls. Every request carries
//! the tag the coordinator needs to decide whether its response is still
//! wanted (a search generation or a details ticket), plus optional trace
//! context so worker spans link back to the event that caused them.

use crate::app::coordinator::Generation;
use crate::domain::{
    Category, FetchErrorKind, Location, SearchQuery, SkillDetail, SkillImage, SkillSummary,
};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for span propagation into worker tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry IDs of the active span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    search(Search { generation: Generation, query: SearchQuery }),
    fetch_details(FetchDetails { id: String, ticket: u64 }),
    load_categories(LoadCategories {}),
    load_locations(LoadLocations {}),
}

/// Requests sent from the event loop to a worker task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Run a search tagged with the coordinator's generation.
    Search {
        generation: Generation,
        query: SearchQuery,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch detail and images for one skill, concurrently.
    FetchDetails {
        id: String,
        ticket: u64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load the category facet catalog.
    LoadCategories {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Load the location facet catalog.
    LoadLocations {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Search { trace_context, .. }
            | Self::FetchDetails { trace_context, .. }
            | Self::LoadCategories { trace_context }
            | Self::LoadLocations { trace_context } => trace_context.as_ref(),
        }
    }
}

/// Which facet catalog a [`WorkerResponse::CatalogFailed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Catalog {
    Categories,
    Locations,
}

/// Responses delivered back to the event loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    SearchCompleted {
        generation: Generation,
        items: Vec<SkillSummary>,
    },

    SearchFailed {
        generation: Generation,
        error: FetchErrorKind,
    },

    /// Both detail and images arrived.
    DetailsLoaded {
        id: String,
        ticket: u64,
        detail: SkillDetail,
        images: Vec<SkillImage>,
    },

    /// Either the detail or the images call failed.
    DetailsFailed {
        id: String,
        ticket: u64,
        error: FetchErrorKind,
    },

    CategoriesLoaded {
        categories: Vec<Category>,
    },

    LocationsLoaded {
        locations: Vec<Location>,
    },

    CatalogFailed {
        catalog: Catalog,
        error: FetchErrorKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_query, FilterState};

    #[test]
    fn builders_omit_missing_trace_context() {
        let message = WorkerMessage::search(Generation::new(4), build_query("plu", &FilterState::default()));
        assert!(message.trace_context().is_none());

        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));

        let back: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}

//! Tracing subscriber setup.

use super::exporter::file_tracer_provider;
use super::rotating_file::{RotatingFile, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "skillsearch-otlp.json";

/// Installs the global subscriber: an `EnvFilter` at `trace_level`
/// (default `info`) feeding an OpenTelemetry layer that writes OTLP JSON to
/// `<data_dir>/skillsearch-otlp.json`.
///
/// Calling it again after a subscriber is installed has no effect.
///
/// # Errors
///
/// Returns [`SkillSearchError::Io`](crate::SkillSearchError::Io) if the data
/// directory cannot be created.
pub fn init_tracing(config: &Config) -> Result<()> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let data_dir = config.resolved_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let trace_file = RotatingFile::new(
        data_dir.join(TRACE_FILE_NAME),
        DEFAULT_MAX_BYTES,
        DEFAULT_BACKUPS,
    );
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "SkillSearch",
    )]);
    let provider = file_tracer_provider(trace_file, resource);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(provider.tracer("SkillSearch")));

    if subscriber.try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

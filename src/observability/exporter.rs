//! Span exporter that appends OTLP JSON lines to a rotating file.

use super::otlp;
use super::rotating_file::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;

#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    shut_down: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, &batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports every finished span straight to `file`.
pub fn file_tracer_provider(file: RotatingFile, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        file,
        resource: resource.clone(),
        shut_down: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::rotating_file::{DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_span_lands_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skillsearch-otlp.json");
        let provider = file_tracer_provider(
            RotatingFile::new(path.clone(), DEFAULT_MAX_BYTES, DEFAULT_BACKUPS),
            Resource::new(vec![KeyValue::new("service.name", "SkillSearch")]),
        );

        provider.tracer("test").in_span("dispatch_search", |_cx| {});
        let _ = provider.force_flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(
            doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "dispatch_search"
        );
    }
}

//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Traces go to `<data_dir>/skillsearch-otlp.json`, one OTLP JSON batch per line
//! - The file rotates at 10MB keeping 3 numbered backups
//! - Spans carry the `service.name = SkillSearch` resource
//!
//! The level comes from the `trace_level` config option and defaults to
//! `"info"`. Worker tasks attach the trace context carried by each
//! [`WorkerMessage`](crate::worker::WorkerMessage) so their spans nest under
//! the event that caused them.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `exporter`: File-backed span exporter and tracer provider
//! - `otlp`: OTLP JSON encoding
//! - `rotating_file`: Size-rotated append-only file

mod exporter;
mod init;
mod otlp;
mod rotating_file;

pub use init::{init_tracing, TRACE_FILE_NAME};

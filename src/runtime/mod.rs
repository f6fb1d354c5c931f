//! Async runtime glue between the pure application layer and tokio.
//!
//! - [`widget`]: Event loop executing actions (timers, worker tasks, alerts)
//! - [`alerts`]: Host-facing alert sink

pub mod alerts;
pub mod widget;

pub use alerts::{AlertSink, TracingAlerts};
pub use widget::Widget;

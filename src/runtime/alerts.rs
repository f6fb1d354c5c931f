//! Alert delivery to the host.

use crate::app::Alert;

/// Receives user-facing alerts raised by the widget.
///
/// Implementations must return promptly; the event loop waits on them.
pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: &Alert);
}

/// Sink that records alerts as `warn` events and shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlerts;

impl AlertSink for TracingAlerts {
    fn alert(&self, alert: &Alert) {
        tracing::warn!(title = %alert.title, text = %alert.text, "alert raised");
    }
}

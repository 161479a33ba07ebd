// LogSink backed by the process-wide tracing subscriber
use chime_core::port::{LogSink, SinkError};

/// Target every notifier record is emitted under
pub const NOTIFIER_TARGET: &str = "chime::notifier";

/// Emits each record as an INFO-level tracing event
///
/// Formatting, filtering and delivery belong to whatever subscriber the
/// host installed; writing never fails from the notifier's point of view.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl TracingLogSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn info(&self, message: &str) -> Result<(), SinkError> {
        tracing::info!(target: NOTIFIER_TARGET, "{}", message);
        Ok(())
    }
}

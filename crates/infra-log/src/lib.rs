// Chime Infrastructure - Logging Adapters
// Implements: LogSink

pub mod tracing_sink;

pub use tracing_sink::{TracingLogSink, NOTIFIER_TARGET};

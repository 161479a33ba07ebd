// Logging Sink Port - the single "write informational record" capability
use thiserror::Error;

/// Failure to write a record
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Logging sink injected into the notifier
///
/// Ownership and durability of the written record are the sink's concern.
pub trait LogSink: Send + Sync {
    /// Write one record at informational severity
    fn info(&self, message: &str) -> Result<(), SinkError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Severity a record was written at
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Severity {
        Info,
    }

    /// A captured record
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LogRecord {
        pub severity: Severity,
        pub message: String,
    }

    /// Captures every record in memory
    #[derive(Clone, Default)]
    pub struct RecordingLogSink {
        records: Arc<Mutex<Vec<LogRecord>>>,
    }

    impl RecordingLogSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn records(&self) -> Vec<LogRecord> {
            self.records
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        pub fn messages(&self) -> Vec<String> {
            self.records().into_iter().map(|r| r.message).collect()
        }
    }

    impl LogSink for RecordingLogSink {
        fn info(&self, message: &str) -> Result<(), SinkError> {
            self.records
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(LogRecord {
                    severity: Severity::Info,
                    message: message.to_string(),
                });
            Ok(())
        }
    }

    /// Rejects every write
    pub struct FailingLogSink {
        reason: String,
    }

    impl FailingLogSink {
        pub fn new(reason: impl Into<String>) -> Self {
            Self {
                reason: reason.into(),
            }
        }
    }

    impl LogSink for FailingLogSink {
        fn info(&self, _message: &str) -> Result<(), SinkError> {
            Err(SinkError::Unavailable(self.reason.clone()))
        }
    }
}

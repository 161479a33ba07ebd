//! Periodic Notifier - logs the current time whenever it is triggered
//!
//! The notifier owns no timing: something else (normally
//! [`TickScheduler`](crate::application::scheduler::TickScheduler)) decides
//! when `on_tick` runs.

use crate::domain::Tick;
use crate::error::Result;
use crate::port::{LogSink, TickHandler, TimeProvider};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// Literal text in front of the timestamp
pub const MESSAGE_PREFIX: &str = "Logging an event at";

pub struct PeriodicNotifier {
    sink: Arc<dyn LogSink>,
    time_provider: Arc<dyn TimeProvider>,
}

impl PeriodicNotifier {
    pub fn new(sink: Arc<dyn LogSink>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            sink,
            time_provider,
        }
    }

    /// Read the clock and write exactly one informational record
    ///
    /// Sink failures are returned to the caller untouched.
    pub fn on_tick(&self) -> Result<()> {
        let now = self.time_provider.now();
        self.sink.info(&format_message(now))?;
        Ok(())
    }
}

impl TickHandler for PeriodicNotifier {
    fn handle_tick(&self, _tick: &Tick) -> Result<()> {
        self.on_tick()
    }
}

/// `Logging an event at 2024-01-01T00:00:05.000Z`
pub fn format_message(now: DateTime<Utc>) -> String {
    format!(
        "{} {}",
        MESSAGE_PREFIX,
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

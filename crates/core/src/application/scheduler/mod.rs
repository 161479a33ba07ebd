// Tick Scheduler - owns the timing mechanism and drives a TickHandler

pub mod constants;
mod panic_guard;
mod shutdown;

pub use panic_guard::{execute_guarded, PanicGuardResult};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::domain::schedule::to_delta;
use crate::domain::{Schedule, Tick};
use crate::port::{TickHandler, TimeProvider};
use chrono::{DateTime, Utc};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Fires ticks on a schedule and hands them to a handler
///
/// Ticks are delivered one at a time on the task running [`TickScheduler::run`];
/// a slow handler delays the next tick instead of overlapping with it. Missed
/// ticks are not replayed.
pub struct TickScheduler {
    schedule: Schedule,
    handler: Arc<dyn TickHandler>,
    time_provider: Arc<dyn TimeProvider>,
    run_on_startup: bool,
}

impl TickScheduler {
    pub fn new(
        schedule: Schedule,
        handler: Arc<dyn TickHandler>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            schedule,
            handler,
            time_provider,
            run_on_startup: false,
        }
    }

    /// Fire one extra tick as soon as `run` starts
    pub fn with_run_on_startup(mut self, enabled: bool) -> Self {
        self.run_on_startup = enabled;
        self
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Run the tick loop until shutdown
    ///
    /// Handler errors and panics are logged and do not stop the loop.
    /// Returns the number of ticks delivered.
    pub async fn run(&self, mut shutdown: ShutdownToken) -> u64 {
        info!(
            schedule = %self.schedule,
            run_on_startup = self.run_on_startup,
            "Tick scheduler started"
        );

        let mut delivered: u64 = 0;

        if self.run_on_startup && !shutdown.is_shutdown() {
            self.deliver(&Tick::startup(self.time_provider.now()));
            delivered += 1;
        }

        let mut last_due: Option<DateTime<Utc>> = None;

        loop {
            if shutdown.is_shutdown() {
                break;
            }

            // Never schedule at or before a slot that was already delivered
            let now = self.time_provider.now();
            let due = self
                .schedule
                .next_after(last_due.map_or(now, |last| last.max(now)));

            let Some(fired_at) = self.wait_until(due, now, &mut shutdown).await else {
                info!("Tick scheduler interrupted while waiting");
                break;
            };

            let is_past_due = fired_at - due >= to_delta(self.schedule.period());
            if is_past_due {
                warn!(due = %due, fired_at = %fired_at, "Tick is past due");
            }

            self.deliver(&Tick::scheduled(due, is_past_due));
            last_due = Some(due);
            delivered += 1;
        }

        info!(ticks = delivered, "Tick scheduler stopped");
        delivered
    }

    /// Sleep until the wall clock reaches `due`
    ///
    /// The sleep runs on tokio's steady clock, which may drift from the wall
    /// clock; wake-ups that land early go back to sleep for the remainder.
    /// Returns the wall-clock time observed at or after `due`, or `None` on
    /// shutdown.
    async fn wait_until(
        &self,
        due: DateTime<Utc>,
        mut now: DateTime<Utc>,
        shutdown: &mut ShutdownToken,
    ) -> Option<DateTime<Utc>> {
        while now < due {
            let delay = (due - now).to_std().unwrap_or(Duration::ZERO);
            debug!(due = %due, delay_ms = delay.as_millis() as u64, "Waiting for next tick");

            tokio::select! {
                _ = sleep(delay) => {},
                _ = shutdown.wait() => return None,
            }

            now = self.time_provider.now();
        }
        Some(now)
    }

    /// Invoke the handler once, applying the host fault policy
    fn deliver(&self, tick: &Tick) {
        let handler = &self.handler;
        match execute_guarded(AssertUnwindSafe(|| handler.handle_tick(tick))) {
            PanicGuardResult::Success(Ok(())) => {
                debug!(scheduled_for = %tick.scheduled_for, source = ?tick.source, "Tick handled");
            }
            PanicGuardResult::Success(Err(e)) => {
                error!(
                    error = %e,
                    scheduled_for = %tick.scheduled_for,
                    "Tick handler failed"
                );
            }
            PanicGuardResult::Panicked(_) => {
                // Logged by execute_guarded
            }
        }
    }
}

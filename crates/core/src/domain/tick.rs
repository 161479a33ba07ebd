// Trigger signal handed to a TickHandler

use chrono::{DateTime, Utc};

/// Why a tick was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSource {
    /// Regular firing of the schedule
    Schedule,
    /// One-off firing when the scheduler starts (`run_on_startup`)
    Startup,
}

/// A single trigger event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Instant the tick was due
    pub scheduled_for: DateTime<Utc>,
    /// Delivered at least one full period after `scheduled_for`
    pub is_past_due: bool,
    pub source: TickSource,
}

impl Tick {
    pub fn scheduled(scheduled_for: DateTime<Utc>, is_past_due: bool) -> Self {
        Self {
            scheduled_for,
            is_past_due,
            source: TickSource::Schedule,
        }
    }

    pub fn startup(now: DateTime<Utc>) -> Self {
        Self {
            scheduled_for: now,
            is_past_due: false,
            source: TickSource::Startup,
        }
    }
}

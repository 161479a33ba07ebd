// Scheduler constants (no magic values)
use std::time::Duration;

/// Schedule used when none is configured: every 5 seconds, aligned to the minute
pub const DEFAULT_SCHEDULE: &str = "*/5 * * * * *";

/// How long the host waits for the scheduler task after requesting shutdown
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

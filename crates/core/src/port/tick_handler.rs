// Tick Handler Port - what the scheduler invokes on each trigger

use crate::domain::Tick;
use crate::error::Result;

/// Reaction to a trigger event
///
/// Implementations run synchronously on the scheduler task and must not
/// block beyond their own I/O. Errors are reported to the scheduler, which
/// applies the host fault policy.
pub trait TickHandler: Send + Sync {
    fn handle_tick(&self, tick: &Tick) -> Result<()>;
}

// Domain Layer - Schedule expressions and trigger signals

pub mod error;
pub mod schedule;
pub mod tick;

// Re-exports
pub use error::DomainError;
pub use schedule::Schedule;
pub use tick::{Tick, TickSource};

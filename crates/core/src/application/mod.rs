// Application Layer - Use Cases

pub mod notifier;
pub mod scheduler;

// Re-exports
pub use notifier::PeriodicNotifier;
pub use scheduler::{shutdown_channel, ShutdownSender, ShutdownToken, TickScheduler};

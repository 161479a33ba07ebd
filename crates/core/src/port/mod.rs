// Port Layer - Interfaces for external dependencies

pub mod log_sink;
pub mod tick_handler;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use log_sink::{LogSink, SinkError};
pub use tick_handler::TickHandler;
pub use time_provider::TimeProvider;

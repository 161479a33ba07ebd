//! Chime - Main Entry Point
//! Hosts the periodic notifier: owns the schedule, the logging backend and shutdown.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chime_core::application::scheduler::constants::SHUTDOWN_GRACE_PERIOD;
use chime_core::application::{shutdown_channel, PeriodicNotifier, TickScheduler};
use chime_core::port::time_provider::SystemTimeProvider;
use chime_core::port::TimeProvider;
use chime_infra_log::TracingLogSink;
use config::{Cli, DaemonConfig, LogFormat, DEFAULT_LOG_FILTER};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Parse configuration (flags, then CHIME_* environment variables)
    let cli = Cli::parse();

    // 2. Initialize logging
    init_logging(cli.log_format)?;

    info!("Chime v{} starting...", VERSION);

    let config = DaemonConfig::try_from(cli).context("Invalid configuration")?;

    // 3. Setup dependencies (DI wiring)
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let sink = Arc::new(TracingLogSink::new());
    let notifier = Arc::new(PeriodicNotifier::new(sink, time_provider.clone()));

    let scheduler = TickScheduler::new(config.schedule, notifier, time_provider)
        .with_run_on_startup(config.run_on_startup);

    info!(schedule = %scheduler.schedule(), "Notifier registered. Press Ctrl+C to shutdown");

    // 4. Start the tick loop
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let scheduler_handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    shutdown_tx.shutdown();
    match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, scheduler_handle).await {
        Ok(Ok(ticks)) => info!(ticks, "Shutdown complete."),
        Ok(Err(e)) => error!(error = ?e, "Scheduler task failed"),
        Err(_) => warn!(
            grace_secs = SHUTDOWN_GRACE_PERIOD.as_secs(),
            "Scheduler did not stop within grace period"
        ),
    }

    Ok(())
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()?;
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .try_init()?;
        }
    }

    Ok(())
}

//! Daemon configuration: command-line flags with environment fallbacks

use chime_core::application::scheduler::constants::DEFAULT_SCHEDULE;
use chime_core::domain::Schedule;
use chime_core::AppError;
use clap::{Parser, ValueEnum};

/// Default `EnvFilter` directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "chime=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "chime")]
#[command(about = "Logs the current UTC time on a fixed schedule", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Schedule expression ("*/5 * * * * *", "00:00:05" or "every 5 seconds")
    #[arg(long, env = "CHIME_SCHEDULE", default_value = DEFAULT_SCHEDULE)]
    pub schedule: String,

    /// Fire once immediately on startup, before the first scheduled tick
    #[arg(long, env = "CHIME_RUN_ON_STARTUP")]
    pub run_on_startup: bool,

    /// Log output format
    #[arg(long, env = "CHIME_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Validated daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub schedule: Schedule,
    pub run_on_startup: bool,
    pub log_format: LogFormat,
}

impl TryFrom<Cli> for DaemonConfig {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            schedule: cli.schedule.parse()?,
            run_on_startup: cli.run_on_startup,
            log_format: cli.log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_test::assert_err;

    fn config_from(args: &[&str]) -> Result<DaemonConfig, AppError> {
        let mut argv = vec!["chime"];
        argv.extend_from_slice(args);
        DaemonConfig::try_from(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults_fire_every_five_seconds() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.schedule, Schedule::cron_seconds(5).unwrap());
        assert!(!config.run_on_startup);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = config_from(&[
            "--schedule",
            "every 2 seconds",
            "--run-on-startup",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.schedule, Schedule::every(Duration::from_secs(2)).unwrap());
        assert!(config.run_on_startup);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_schedule_is_config_error() {
        let err = assert_err!(config_from(&["--schedule", "sometimes"]));
        assert!(matches!(err, AppError::Domain(_)));
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        assert!(Cli::try_parse_from(["chime", "--log-format", "xml"]).is_err());
    }
}

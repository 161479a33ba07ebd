//! Schedule expressions supplied when a notifier is registered.
//!
//! Three forms are recognized:
//! - six-field cron restricted to a seconds step: `*/5 * * * * *`
//! - TimeSpan: `00:00:05`
//! - interval phrase: `every 5 seconds`

use super::error::{DomainError, Result};
use chrono::{DateTime, Timelike, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Number of fields in a cron expression with a leading seconds field
const CRON_FIELDS: usize = 6;

const SECONDS_PER_MINUTE: u32 = 60;

/// Smallest accepted fixed period
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Largest accepted fixed period (24 hours)
pub const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// When ticks occur
///
/// Only built through [`Schedule::every`], [`Schedule::cron_seconds`] or
/// `FromStr`, so the period is always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule(Kind);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Fixed delay measured from the previous firing
    Every(Duration),
    /// Aligned to the wall clock: fires at every second of the minute
    /// that is a multiple of the step
    CronSeconds(u32),
}

impl Schedule {
    /// Fixed-delay schedule (whole milliseconds, 1ms ..= 24h)
    pub fn every(period: Duration) -> Result<Self> {
        checked_every(&format!("{period:?}"), period)
    }

    /// Wall-clock aligned schedule, `*/step * * * * *` (1 ..= 59)
    pub fn cron_seconds(step: u32) -> Result<Self> {
        checked_cron(&format!("*/{step} * * * * *"), step)
    }

    /// Nominal period between ticks
    ///
    /// For cron steps that do not divide 60 the last gap of each minute is
    /// shorter than this.
    pub fn period(&self) -> Duration {
        match *self {
            Schedule(Kind::Every(period)) => period,
            Schedule(Kind::CronSeconds(step)) => Duration::from_secs(u64::from(step)),
        }
    }

    /// Next due instant strictly after `now`
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Schedule(Kind::Every(period)) => now + to_delta(period),
            Schedule(Kind::CronSeconds(step)) => {
                let second = now.second();
                let minute_start = now
                    - chrono::Duration::seconds(i64::from(second))
                    - chrono::Duration::nanoseconds(i64::from(now.nanosecond()));
                let next = (second / step + 1) * step;
                let offset = if next >= SECONDS_PER_MINUTE {
                    SECONDS_PER_MINUTE
                } else {
                    next
                };
                minute_start + chrono::Duration::seconds(i64::from(offset))
            }
        }
    }
}

/// Convert a validated period (<= MAX_PERIOD) to a chrono delta
pub(crate) fn to_delta(period: Duration) -> chrono::Duration {
    let millis = i64::try_from(period.as_millis()).unwrap_or(i64::MAX);
    chrono::Duration::milliseconds(millis)
}

fn checked_every(expression: &str, period: Duration) -> Result<Schedule> {
    if period < MIN_PERIOD {
        return Err(DomainError::invalid_schedule(
            expression,
            "period must be at least 1 millisecond",
        ));
    }
    if period > MAX_PERIOD {
        return Err(DomainError::invalid_schedule(
            expression,
            "period must not exceed 24 hours",
        ));
    }
    if period.subsec_nanos() % 1_000_000 != 0 {
        return Err(DomainError::invalid_schedule(
            expression,
            "period must be a whole number of milliseconds",
        ));
    }
    Ok(Schedule(Kind::Every(period)))
}

fn checked_cron(expression: &str, step: u32) -> Result<Schedule> {
    if step == 0 || step >= SECONDS_PER_MINUTE {
        return Err(DomainError::invalid_schedule(
            expression,
            "seconds step must be between 1 and 59",
        ));
    }
    Ok(Schedule(Kind::CronSeconds(step)))
}

impl FromStr for Schedule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let expression = s.trim();
        if expression.is_empty() {
            return Err(DomainError::invalid_schedule(s, "empty expression"));
        }

        let lower = expression.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("every ") {
            return parse_interval(expression, rest);
        }
        if expression.contains(':') {
            return parse_timespan(expression);
        }
        if expression.split_whitespace().count() == CRON_FIELDS {
            return parse_cron(expression);
        }

        Err(DomainError::invalid_schedule(
            expression,
            "expected a six-field cron expression, an hh:mm:ss timespan or 'every N <unit>'",
        ))
    }
}

/// `every 5 seconds`, `every 250 ms`, `every 1 hour`
fn parse_interval(expression: &str, rest: &str) -> Result<Schedule> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let [count, unit] = tokens.as_slice() else {
        return Err(DomainError::invalid_schedule(
            expression,
            "expected 'every <count> <unit>'",
        ));
    };

    let count: u64 = count.parse().map_err(|_| {
        DomainError::invalid_schedule(expression, format!("'{count}' is not a whole number"))
    })?;

    let unit_millis: u64 = match *unit {
        "ms" | "millisecond" | "milliseconds" => 1,
        "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
        other => {
            return Err(DomainError::invalid_schedule(
                expression,
                format!("unknown unit '{other}'"),
            ))
        }
    };

    let millis = count
        .checked_mul(unit_millis)
        .ok_or_else(|| DomainError::invalid_schedule(expression, "period overflows"))?;

    checked_every(expression, Duration::from_millis(millis))
}

/// `hh:mm:ss`
fn parse_timespan(expression: &str) -> Result<Schedule> {
    let parts: Vec<&str> = expression.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(DomainError::invalid_schedule(
            expression,
            "timespan must be hh:mm:ss",
        ));
    };

    let field = |value: &str, name: &str, max: u64| -> Result<u64> {
        let parsed: u64 = value.trim().parse().map_err(|_| {
            DomainError::invalid_schedule(expression, format!("invalid {name} '{value}'"))
        })?;
        if parsed > max {
            return Err(DomainError::invalid_schedule(
                expression,
                format!("{name} must be at most {max}"),
            ));
        }
        Ok(parsed)
    };

    let hours = field(*hours, "hours", 24)?;
    let minutes = field(*minutes, "minutes", 59)?;
    let seconds = field(*seconds, "seconds", 59)?;

    checked_every(
        expression,
        Duration::from_secs(hours * 3600 + minutes * 60 + seconds),
    )
}

/// `*/N * * * * *` or `* * * * * *`
fn parse_cron(expression: &str) -> Result<Schedule> {
    let fields: Vec<&str> = expression.split_whitespace().collect();

    if fields[1..].iter().any(|f| *f != "*") {
        return Err(DomainError::invalid_schedule(
            expression,
            "only the seconds field may be restricted",
        ));
    }

    let seconds = fields[0];
    if seconds == "*" {
        return checked_cron(expression, 1);
    }

    let Some(step) = seconds.strip_prefix("*/") else {
        return Err(DomainError::invalid_schedule(
            expression,
            "seconds field must be '*' or '*/N'",
        ));
    };

    let step: u32 = step.parse().map_err(|_| {
        DomainError::invalid_schedule(expression, format!("invalid seconds step '{step}'"))
    })?;

    checked_cron(expression, step)
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Schedule(Kind::CronSeconds(1)) => write!(f, "* * * * * *"),
            Schedule(Kind::CronSeconds(step)) => write!(f, "*/{step} * * * * *"),
            Schedule(Kind::Every(period)) => {
                let millis = period.as_millis();
                if millis % 3_600_000 == 0 {
                    write!(f, "every {} hours", millis / 3_600_000)
                } else if millis % 60_000 == 0 {
                    write!(f, "every {} minutes", millis / 60_000)
                } else if millis % 1_000 == 0 {
                    write!(f, "every {} seconds", millis / 1_000)
                } else {
                    write!(f, "every {millis} milliseconds")
                }
            }
        }
    }
}

//! Wall-clock source for transaction nonce times.

use chrono::{DateTime, Utc};

/// `nonce_time` layout: UTC, microsecond precision, literal `Z` suffix.
pub const NONCE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time rendered as a `nonce_time` string.
    fn nonce_time(&self) -> String {
        format_nonce_time(&self.now())
    }
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn format_nonce_time(instant: &DateTime<Utc>) -> String {
    instant.format(NONCE_TIME_FORMAT).to_string()
}

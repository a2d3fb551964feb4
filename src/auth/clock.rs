//! Timestamp source for signed Firi requests.
//!
//! Firi rejects signatures whose timestamp plus validity window lies in the
//! past, so every authenticated request reads the clock afresh.

use time::OffsetDateTime;

/// Trait for providing the unix timestamp embedded in signed requests.
pub trait Clock: Send + Sync {
    /// Current time in whole seconds since the UNIX epoch.
    fn now_unix(&self) -> i64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}

/// A clock frozen at a fixed instant, for reproducible signatures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

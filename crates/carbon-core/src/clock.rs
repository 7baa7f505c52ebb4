//! Wall-clock abstraction for time bucketing
use chrono::{DateTime, TimeZone, Utc};

/// Format of a minute-resolution time bucket (e.g. `202610191432`)
pub const TIME_BUCKET_FORMAT: &str = "%Y%m%d%H%M";

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time truncated to the minute
    fn time_bucket(&self) -> String {
        time_bucket(self.now())
    }
}

/// Truncate a timestamp to its minute bucket string
pub fn time_bucket(at: DateTime<Utc>) -> String {
    at.format(TIME_BUCKET_FORMAT).to_string()
}

/// The real UTC clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for reproducible tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Frozen at the given UTC calendar minute; invalid dates fall back to the epoch
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or_default();
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

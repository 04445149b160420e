use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The wall clock, read through [`SystemTime::now`] on every call.
///
/// A clock set before 1970 reads as `0`; anything set before
/// [`DISCORD_EPOCH`] makes snowflake generation fail with
/// [`Error::InvalidRange`].
///
/// [`DISCORD_EPOCH`]: crate::DISCORD_EPOCH
/// [`Error::InvalidRange`]: crate::Error::InvalidRange
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource<i64> for SystemClock {
    fn current_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

/// A clock pinned to one instant, for reproducible forging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock {
    pub millis: i64,
}

impl TimeSource<i64> for FixedClock {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

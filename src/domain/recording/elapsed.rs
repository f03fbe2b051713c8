//! Elapsed recording time value object

use std::fmt;
use std::time::Duration as StdDuration;

/// Interval between two ticks of the recording timer
pub const TICK_INTERVAL_SECS: u64 = 1;

/// Whole seconds counted by the recording ticker.
/// Only ever grows within one recording episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Elapsed {
    seconds: u64,
}

impl Elapsed {
    /// Zero elapsed time
    pub const ZERO: Self = Self { seconds: 0 };

    /// Create from a number of seconds
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Get elapsed time in seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_secs(self.seconds)
    }

    /// The tick interval as a std::time::Duration
    pub const fn tick_interval() -> StdDuration {
        StdDuration::from_secs(TICK_INTERVAL_SECS)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.seconds / 60;
        let seconds = self.seconds % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl From<u64> for Elapsed {
    fn from(seconds: u64) -> Self {
        Self::from_secs(seconds)
    }
}

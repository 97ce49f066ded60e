//! Local flight timestamps.
//!
//! Flight data carries local departure and arrival times without a zone.
//! All search comparisons happen on these naive values; conversion to UTC is
//! only done at the reporting boundary when an offset is known.

use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::ops::Add;

/// Input format for timestamps, e.g. `2017-05-01 06:35:00`.
const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output format, truncated to minute precision.
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: expected YYYY-MM-DD HH:MM:SS")]
pub struct TimeError {
    input: String,
}

/// A local (zone-less) timestamp of a departure or arrival.
///
/// # Examples
///
/// ```
/// use flight_tours::domain::FlightTime;
/// use chrono::Duration;
///
/// let dep = FlightTime::parse("2017-05-01 23:30:45").unwrap();
/// assert_eq!(dep.to_string(), "2017-05-01T23:30");
///
/// // Adding a duration crosses midnight
/// let later = dep + Duration::hours(3);
/// assert_eq!(later.to_string(), "2017-05-02T02:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightTime(NaiveDateTime);

impl FlightTime {
    /// Wrap an existing `NaiveDateTime`.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Parse a timestamp in `YYYY-MM-DD HH:MM:SS` format.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        NaiveDateTime::parse_from_str(s.trim(), INPUT_FORMAT)
            .map(Self)
            .map_err(|_| TimeError {
                input: s.to_string(),
            })
    }

    /// Returns the underlying `NaiveDateTime`.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Add a duration, returning `None` on overflow.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }
}

impl Add<Duration> for FlightTime {
    type Output = Self;

    /// Saturates at the maximum representable time instead of overflowing.
    fn add(self, rhs: Duration) -> Self::Output {
        self.checked_add(rhs).unwrap_or(Self(NaiveDateTime::MAX))
    }
}

impl fmt::Debug for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightTime({})", self.0.format(INPUT_FORMAT))
    }
}

impl fmt::Display for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(OUTPUT_FORMAT))
    }
}

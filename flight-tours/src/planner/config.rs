//! Search configuration for the tour planner.

use chrono::Duration;

/// Error returned for an unusable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A tour needs an outbound and a return leg at least
    #[error("chain length must be at least 2, got {0}")]
    ChainTooShort(usize),

    /// Layover cannot be negative
    #[error("minimum stay must not be negative, got {0} minutes")]
    NegativeStay(i64),

    /// Trip span must be positive
    #[error("maximum trip span must be positive, got {0} days")]
    NonPositiveTrip(i64),

    /// A cap of zero would never emit anything
    #[error("output cap must be positive (use no cap for unbounded output)")]
    ZeroCap,
}

/// Configuration parameters for tour search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of flights (and visited countries) in every tour.
    pub chain_length: usize,

    /// Minimum time between landing and the next departure (minutes).
    pub min_stay_mins: i64,

    /// Every leg must land before first departure + this many days.
    pub max_trip_days: i64,

    /// Stop after this many tours. `None` means unbounded.
    pub output_cap: Option<usize>,

    /// Advance per-airport resume cursors past flights older than the
    /// current root. Disabling only costs time; results are identical.
    pub resume_cursor: bool,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        chain_length: usize,
        min_stay_mins: i64,
        max_trip_days: i64,
        output_cap: Option<usize>,
    ) -> Self {
        Self {
            chain_length,
            min_stay_mins,
            max_trip_days,
            output_cap,
            resume_cursor: true,
        }
    }

    /// Check that the configuration can drive a search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_length < 2 {
            return Err(ConfigError::ChainTooShort(self.chain_length));
        }
        if self.min_stay_mins < 0 {
            return Err(ConfigError::NegativeStay(self.min_stay_mins));
        }
        if self.max_trip_days <= 0 {
            return Err(ConfigError::NonPositiveTrip(self.max_trip_days));
        }
        if self.output_cap == Some(0) {
            return Err(ConfigError::ZeroCap);
        }
        Ok(())
    }

    /// Returns the minimum stay as a Duration.
    pub fn min_stay(&self) -> Duration {
        Duration::minutes(self.min_stay_mins)
    }

    /// Returns the maximum trip span as a Duration.
    pub fn max_trip(&self) -> Duration {
        Duration::days(self.max_trip_days)
    }

    /// Chain length past which every leg must fly back to the origin.
    ///
    /// At exactly this length the next leg must also depart from an airport
    /// with a direct flight into the origin.
    pub fn return_threshold(&self) -> usize {
        self.chain_length.saturating_sub(2)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            chain_length: 10,
            min_stay_mins: 180, // 3 hours
            max_trip_days: 366,
            output_cap: Some(100),
            resume_cursor: true,
        }
    }
}

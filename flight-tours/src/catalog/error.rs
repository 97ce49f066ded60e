//! Input loading error types.

use std::path::PathBuf;

use crate::domain::{InvalidAirportCode, TimeError};

/// Errors that abort loading.
///
/// Unresolvable airport codes are not errors; they are collected into the
/// diagnostic set of [`LoadedFlights`](super::LoadedFlights).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Input file could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV structure is broken (bad quoting, wrong field count, missing column)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record contains a malformed airport code
    #[error("record {record}: {source}")]
    InvalidAirportCode {
        record: usize,
        source: InvalidAirportCode,
    },

    /// A record contains a malformed timestamp
    #[error("record {record}: {source}")]
    InvalidTime { record: usize, source: TimeError },

    /// A UTC offset is outside the representable range
    #[error("record {record}: UTC offset of {minutes} minutes is out of range")]
    InvalidOffset { record: usize, minutes: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirportCode, FlightTime};

    #[test]
    fn error_display() {
        let err = LoadError::Io {
            path: PathBuf::from("flights.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to open flights.csv: not found");

        let err = LoadError::InvalidAirportCode {
            record: 3,
            source: AirportCode::parse("pr").unwrap_err(),
        };
        assert_eq!(
            err.to_string(),
            "record 3: IATA code \"pr\" has 2 characters, expected 3"
        );

        let err = LoadError::InvalidTime {
            record: 7,
            source: FlightTime::parse("yesterday").unwrap_err(),
        };
        assert!(err.to_string().starts_with("record 7: invalid timestamp"));

        let err = LoadError::InvalidOffset {
            record: 2,
            minutes: 100_000,
        };
        assert_eq!(
            err.to_string(),
            "record 2: UTC offset of 100000 minutes is out of range"
        );
    }
}

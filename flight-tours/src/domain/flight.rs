//! Flight types.

use std::fmt;

use super::{AirportCode, CountryCode, FlightTime};

/// Position of a flight in the catalog's departure order.
///
/// Indices strictly respect departure-time order (ties keep input order), so
/// comparing two indices answers "which departs earlier".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightIndex(pub usize);

impl fmt::Display for FlightIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dense id of an airport in the catalog, assigned in order of first appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AirportId(pub usize);

/// A resolved flight record, as produced by input loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
    pub source: AirportCode,
    pub destination: AirportCode,
    pub source_country: CountryCode,
    pub destination_country: CountryCode,
    pub departure: FlightTime,
    pub arrival: FlightTime,
}

/// One end of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub airport: AirportId,
    pub code: AirportCode,
    pub country: CountryCode,
}

/// A flight in the catalog.
///
/// Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub index: FlightIndex,
    pub source: Stop,
    pub destination: Stop,
    pub departure: FlightTime,
    pub arrival: FlightTime,
}

impl Flight {
    /// True when source and destination are in different countries.
    pub fn is_international(&self) -> bool {
        self.source.country != self.destination.country
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}->{} {}..{}",
            self.index, self.source.code, self.destination.code, self.departure, self.arrival
        )
    }
}

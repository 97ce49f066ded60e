//! Flight catalog and input loading.
//!
//! The catalog holds every usable flight sorted by departure time, each with
//! a stable [`FlightIndex`]. It is built once per input and is read-only
//! afterwards.

mod codes;
mod error;
mod loader;

use std::collections::HashMap;
use std::ops::Index;

pub use codes::{AirportInfo, AirportTable, Coordinates};
pub use error::LoadError;
pub use loader::{
    DEFAULT_FLIGHT_DELIMITER, LoadedFlights, load_airports, load_airports_from_path, load_flights,
    load_flights_from_path, load_utc_offsets, load_utc_offsets_from_path,
};

use crate::domain::{AirportCode, AirportId, Flight, FlightIndex, FlightRecord, Stop};

/// All usable flights in ascending departure order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    flights: Vec<Flight>,
    /// Airport code per `AirportId`.
    airports: Vec<AirportCode>,
    ids: HashMap<AirportCode, AirportId>,
}

impl Catalog {
    /// Build the catalog from resolved records.
    ///
    /// Records are stably sorted by departure, so flights departing at the
    /// same moment keep their input order. Position indices follow the
    /// sorted order.
    pub fn from_records(mut records: Vec<FlightRecord>) -> Self {
        records.sort_by_key(|r| r.departure);

        let mut catalog = Self::default();
        catalog.flights.reserve(records.len());

        for (position, record) in records.into_iter().enumerate() {
            let source = Stop {
                airport: catalog.intern(record.source),
                code: record.source,
                country: record.source_country,
            };
            let destination = Stop {
                airport: catalog.intern(record.destination),
                code: record.destination,
                country: record.destination_country,
            };
            catalog.flights.push(Flight {
                index: FlightIndex(position),
                source,
                destination,
                departure: record.departure,
                arrival: record.arrival,
            });
        }

        catalog
    }

    fn intern(&mut self, code: AirportCode) -> AirportId {
        if let Some(id) = self.ids.get(&code) {
            return *id;
        }
        let id = AirportId(self.airports.len());
        self.airports.push(code);
        self.ids.insert(code, id);
        id
    }

    /// All flights in position order.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Number of flights.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Returns true if there are no flights.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Number of distinct airports.
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    /// Code of an interned airport.
    pub fn airport_code(&self, id: AirportId) -> Option<AirportCode> {
        self.airports.get(id.0).copied()
    }

    /// Id of an airport, if any flight touches it.
    pub fn airport_id(&self, code: &AirportCode) -> Option<AirportId> {
        self.ids.get(code).copied()
    }
}

impl Index<FlightIndex> for Catalog {
    type Output = Flight;

    fn index(&self, index: FlightIndex) -> &Flight {
        &self.flights[index.0]
    }
}

//! Per-airport index of outgoing flights for chain search.
//!
//! Each airport keeps its departures in catalog order, the set of airports
//! with a direct flight landing there, and a resume cursor. The cursor is the
//! only state that changes after the index is built.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::domain::{AirportId, FlightIndex};

/// Index entry of one airport.
#[derive(Debug, Clone, Default)]
pub struct AirportEntry {
    /// Departing flights, ascending by position index.
    outgoing: Vec<FlightIndex>,

    /// Airports with at least one direct flight landing here.
    inbound_sources: HashSet<AirportId>,

    /// Offset into `outgoing` before which every flight is older than any
    /// root still to be searched.
    cursor: usize,
}

impl AirportEntry {
    /// Departing flights in position order.
    pub fn outgoing(&self) -> &[FlightIndex] {
        &self.outgoing
    }

    /// Airports with a direct flight into this one.
    pub fn inbound_sources(&self) -> &HashSet<AirportId> {
        &self.inbound_sources
    }

    /// Current resume cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Airport index built once from the catalog.
///
/// # Cursor invariant
///
/// The resume cursor of an airport only moves forward, and only past flights
/// whose position is at or below the root of the search that advanced it.
/// This is sound as long as roots are searched in non-decreasing position
/// order: a flight older than the current root is older than every later
/// root too. The chain search is the only writer.
#[derive(Debug, Clone)]
pub struct AirportIndex {
    /// Entry per `AirportId`.
    entries: Vec<AirportEntry>,
}

impl AirportIndex {
    /// Build the index. Every airport in the catalog gets an entry, even
    /// one with no departures.
    pub fn build(catalog: &Catalog) -> Self {
        let mut entries = vec![AirportEntry::default(); catalog.airport_count()];

        for flight in catalog.flights() {
            entries[flight.source.airport.0].outgoing.push(flight.index);
            entries[flight.destination.airport.0]
                .inbound_sources
                .insert(flight.source.airport);
        }

        Self { entries }
    }

    /// Get the entry of an airport.
    ///
    /// # Panics
    ///
    /// Panics if the airport does not belong to the catalog this index was
    /// built from.
    pub fn entry(&self, airport: AirportId) -> &AirportEntry {
        &self.entries[airport.0]
    }

    /// Departing flights of an airport in position order.
    pub fn outgoing(&self, airport: AirportId) -> &[FlightIndex] {
        &self.entry(airport).outgoing
    }

    /// Current resume cursor of an airport.
    pub fn cursor(&self, airport: AirportId) -> usize {
        self.entry(airport).cursor
    }

    /// Check whether `from` has a direct flight landing at `origin`.
    pub fn is_returnable(&self, origin: AirportId, from: AirportId) -> bool {
        self.entry(origin).inbound_sources.contains(&from)
    }

    /// Move an airport's resume cursor forward.
    pub(super) fn advance_cursor(&mut self, airport: AirportId, to: usize) {
        let entry = &mut self.entries[airport.0];
        debug_assert!(
            to >= entry.cursor && to <= entry.outgoing.len(),
            "resume cursor must move forward within bounds"
        );
        entry.cursor = to;
    }

    /// Get the number of airports.
    pub fn airport_count(&self) -> usize {
        self.entries.len()
    }
}

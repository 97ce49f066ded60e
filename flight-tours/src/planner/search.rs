//! Depth-first chain search.
//!
//! Every international flight in the catalog is tried as the first leg of a
//! tour, in position order. From each root the search extends the chain one
//! leg at a time through the [`AirportIndex`], backtracking after every
//! candidate, until the chain reaches the configured length and is handed to
//! the [`ResultSink`].

use std::io;
use std::ops::ControlFlow;

use tracing::{debug, info, trace};

use super::airport_index::AirportIndex;
use super::config::{ConfigError, SearchConfig};
use super::sink::{CappedSink, ItineraryOutput, ResultSink};
use crate::catalog::Catalog;
use crate::domain::{AirportId, CountryCode, Flight, FlightIndex, FlightTime};

/// Error from running a planned search.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Configuration was rejected before searching
    #[error("invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    /// The output boundary failed while writing a tour
    #[error("output failed after {written} tours: {source}")]
    Output { written: usize, source: io::Error },
}

/// Counters from one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// International flights the search started from.
    pub roots_tried: usize,

    /// Completed chains handed to the sink. [`Planner::run`] replaces this
    /// with the number of tours actually written.
    pub chains_emitted: usize,

    /// Outgoing flights inspected across all scans.
    pub flights_scanned: usize,

    /// True if the sink stopped the search.
    pub aborted: bool,
}

/// Values fixed for every frame below one root.
#[derive(Debug, Clone, Copy)]
struct RootBounds {
    /// Airport the tour must return to.
    origin: AirportId,

    /// Position of the root. Flights at or below it are older than anything
    /// this or any later root can use.
    lower_bound: FlightIndex,

    /// Every leg must land strictly before this.
    deadline: FlightTime,
}

/// One recursion level: where the chain currently stands.
#[derive(Debug, Clone, Copy)]
struct Frame {
    airport: AirportId,
    country: CountryCode,
    earliest_departure: FlightTime,
}

/// The chain under construction, shared by all levels and popped on
/// backtrack.
#[derive(Debug, Default)]
struct Trail {
    chain: Vec<FlightIndex>,
    /// Source country of each leg in `chain`.
    countries: Vec<CountryCode>,
}

impl Trail {
    fn push(&mut self, flight: &Flight) {
        self.chain.push(flight.index);
        self.countries.push(flight.source.country);
    }

    fn pop(&mut self) {
        self.chain.pop();
        self.countries.pop();
    }

    fn len(&self) -> usize {
        self.chain.len()
    }
}

/// A single, non-restartable search over a catalog.
///
/// The search advances the resume cursors of the index it borrows, so an
/// index can serve exactly one run. Roots are processed in non-decreasing
/// position order, which is what makes those cursor moves sound.
///
/// The search is single-threaded. Splitting roots across threads would need
/// the cursors partitioned per airport or updated in root order.
pub struct ChainSearch<'a> {
    catalog: &'a Catalog,
    index: &'a mut AirportIndex,
    config: &'a SearchConfig,
    summary: SearchSummary,
}

impl<'a> ChainSearch<'a> {
    /// Create a search. `index` must be freshly built from `catalog`, and
    /// `config` should already be validated.
    pub fn new(catalog: &'a Catalog, index: &'a mut AirportIndex, config: &'a SearchConfig) -> Self {
        debug_assert_eq!(index.airport_count(), catalog.airport_count());
        Self {
            catalog,
            index,
            config,
            summary: SearchSummary::default(),
        }
    }

    /// Run the search to completion or until the sink stops it.
    pub fn run<S: ResultSink + ?Sized>(mut self, sink: &mut S) -> SearchSummary {
        let catalog = self.catalog;

        for root in catalog.flights() {
            if !root.is_international() {
                continue;
            }

            self.summary.roots_tried += 1;
            trace!(root = %root, "Searching from root");

            if self.search_root(root, sink).is_break() {
                self.summary.aborted = true;
                break;
            }
        }

        info!(
            roots = self.summary.roots_tried,
            emitted = self.summary.chains_emitted,
            scanned = self.summary.flights_scanned,
            aborted = self.summary.aborted,
            "Chain search complete"
        );

        self.summary
    }

    fn search_root<S: ResultSink + ?Sized>(&mut self, root: &Flight, sink: &mut S) -> ControlFlow<()> {
        let bounds = RootBounds {
            origin: root.source.airport,
            lower_bound: root.index,
            deadline: root.departure + self.config.max_trip(),
        };

        let mut trail = Trail::default();
        trail.push(root);

        let frame = Frame {
            airport: root.destination.airport,
            country: root.destination.country,
            earliest_departure: root.arrival + self.config.min_stay(),
        };

        self.extend(frame, &bounds, &mut trail, sink)
    }

    /// Try every usable departure from the frame's airport as the next leg.
    fn extend<S: ResultSink + ?Sized>(
        &mut self,
        frame: Frame,
        bounds: &RootBounds,
        trail: &mut Trail,
        sink: &mut S,
    ) -> ControlFlow<()> {
        let catalog = self.catalog;
        let start = if self.config.resume_cursor {
            self.index.cursor(frame.airport)
        } else {
            0
        };
        let end = self.index.outgoing(frame.airport).len();

        // Offset (relative to `start`) of the last flight older than the root
        let mut last_skippable: Option<usize> = None;

        for offset in start..end {
            let flight = &catalog[self.index.outgoing(frame.airport)[offset]];
            self.summary.flights_scanned += 1;

            if flight.index <= bounds.lower_bound {
                last_skippable = Some(offset - start);
                continue;
            }

            // Not yet eligible; a later departure may still be
            if flight.departure < frame.earliest_departure {
                continue;
            }

            // Departures ascend, so every later flight here is too late as well
            if flight.arrival >= bounds.deadline {
                break;
            }

            if !self.accepts(flight, &frame, bounds, trail) {
                continue;
            }

            trail.push(flight);
            let flow = if trail.len() >= self.config.chain_length {
                self.summary.chains_emitted += 1;
                sink.emit(&trail.chain)
            } else {
                let next = Frame {
                    airport: flight.destination.airport,
                    country: flight.destination.country,
                    earliest_departure: flight.arrival + self.config.min_stay(),
                };
                self.extend(next, bounds, trail, sink)
            };
            trail.pop();

            if flow.is_break() {
                return flow;
            }
        }

        if self.config.resume_cursor {
            let to = start + last_skippable.map_or(0, |offset| offset + 1);
            if to > start {
                trace!(airport = frame.airport.0, from = start, to, "Advancing resume cursor");
            }
            self.index.advance_cursor(frame.airport, to);
        }

        ControlFlow::Continue(())
    }

    /// Leg rules for a candidate that is already temporally feasible.
    fn accepts(&self, flight: &Flight, frame: &Frame, bounds: &RootBounds, trail: &Trail) -> bool {
        let chain_len = trail.len();
        let threshold = self.config.return_threshold();

        // Near the end every leg must fly home
        if chain_len > threshold {
            return flight.destination.airport == bounds.origin;
        }

        let country = flight.destination.country;
        if country == frame.country || trail.countries.contains(&country) {
            return false;
        }

        // The current airport must have a direct flight into the origin
        if chain_len == threshold && !self.index.is_returnable(bounds.origin, frame.airport) {
            return false;
        }

        true
    }
}

/// Outcome of [`Planner::run`].
#[derive(Debug)]
pub struct PlanOutcome<O> {
    pub summary: SearchSummary,
    pub output: O,
}

/// Validates configuration, builds the index and runs one capped search.
pub struct Planner<'a> {
    catalog: &'a Catalog,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(catalog: &'a Catalog, config: &'a SearchConfig) -> Self {
        Self { catalog, config }
    }

    /// Search the catalog, writing every tour to `output`.
    pub fn run<O: ItineraryOutput>(&self, output: O) -> Result<PlanOutcome<O>, PlanError> {
        self.config.validate()?;

        let mut index = AirportIndex::build(self.catalog);
        debug!(
            flights = self.catalog.len(),
            airports = index.airport_count(),
            "Built airport index"
        );

        let mut sink = CappedSink::new(self.catalog, output, self.config.output_cap);
        let mut summary = ChainSearch::new(self.catalog, &mut index, self.config).run(&mut sink);
        summary.chains_emitted = sink.emitted();

        let written = sink.emitted();
        let output = sink
            .finish()
            .map_err(|source| PlanError::Output { written, source })?;

        Ok(PlanOutcome { summary, output })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

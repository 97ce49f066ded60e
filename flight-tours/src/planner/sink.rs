//! Result sink: counts completed tours and enforces the output cap.
//!
//! The sink's return value is the only way the search learns to stop.

use std::io;
use std::ops::ControlFlow;

use tracing::warn;

use crate::catalog::Catalog;
use crate::domain::{Flight, FlightIndex};

/// Receiver of completed chains.
pub trait ResultSink {
    /// Accept a completed chain. `Break` aborts the whole search.
    fn emit(&mut self, chain: &[FlightIndex]) -> ControlFlow<()>;
}

impl<F> ResultSink for F
where
    F: FnMut(&[FlightIndex]) -> ControlFlow<()>,
{
    fn emit(&mut self, chain: &[FlightIndex]) -> ControlFlow<()> {
        self(chain)
    }
}

/// Output boundary fed by [`CappedSink`].
pub trait ItineraryOutput {
    /// Write one tour. `sequence` is 1-based.
    fn write_itinerary(&mut self, sequence: usize, legs: &[&Flight]) -> io::Result<()>;
}

impl<O: ItineraryOutput + ?Sized> ItineraryOutput for &mut O {
    fn write_itinerary(&mut self, sequence: usize, legs: &[&Flight]) -> io::Result<()> {
        (**self).write_itinerary(sequence, legs)
    }
}

/// Collects tours as chains of position indices.
impl ItineraryOutput for Vec<Vec<FlightIndex>> {
    fn write_itinerary(&mut self, _sequence: usize, legs: &[&Flight]) -> io::Result<()> {
        self.push(legs.iter().map(|f| f.index).collect());
        Ok(())
    }
}

/// Sink that numbers tours, resolves them to flights and stops at a cap.
pub struct CappedSink<'a, O> {
    catalog: &'a Catalog,
    output: O,
    cap: Option<usize>,
    emitted: usize,
    error: Option<io::Error>,
}

impl<'a, O: ItineraryOutput> CappedSink<'a, O> {
    /// Create a sink. `cap` of `None` never stops the search.
    pub fn new(catalog: &'a Catalog, output: O, cap: Option<usize>) -> Self {
        Self {
            catalog,
            output,
            cap,
            emitted: 0,
            error: None,
        }
    }

    /// Number of tours written so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// True once the cap has been reached.
    pub fn cap_reached(&self) -> bool {
        self.cap.is_some_and(|cap| self.emitted >= cap)
    }

    /// Return the output, or the write error that stopped the search.
    pub fn finish(self) -> io::Result<O> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.output),
        }
    }
}

impl<O: ItineraryOutput> ResultSink for CappedSink<'_, O> {
    fn emit(&mut self, chain: &[FlightIndex]) -> ControlFlow<()> {
        if self.error.is_some() || self.cap_reached() {
            return ControlFlow::Break(());
        }

        let catalog = self.catalog;
        let legs: Vec<&Flight> = chain.iter().map(|&idx| &catalog[idx]).collect();
        let sequence = self.emitted + 1;

        if let Err(err) = self.output.write_itinerary(sequence, &legs) {
            warn!(error = %err, sequence, "Failed to write tour, stopping");
            self.error = Some(err);
            return ControlFlow::Break(());
        }
        self.emitted = sequence;

        if self.cap_reached() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirportCode, CountryCode, FlightRecord, FlightTime};

    fn catalog() -> Catalog {
        let departure = FlightTime::parse("2017-01-01 10:00:00").unwrap();
        let record = FlightRecord {
            source: AirportCode::parse("PRG").unwrap(),
            destination: AirportCode::parse("VIE").unwrap(),
            source_country: CountryCode::parse("CZ").unwrap(),
            destination_country: CountryCode::parse("AT").unwrap(),
            departure,
            arrival: departure + chrono::Duration::hours(1),
        };
        Catalog::from_records(vec![record.clone(), record])
    }

    /// Output recording sequence numbers, failing on a given sequence.
    struct Recording {
        sequences: Vec<usize>,
        fail_on: Option<usize>,
    }

    impl ItineraryOutput for Recording {
        fn write_itinerary(&mut self, sequence: usize, _legs: &[&Flight]) -> io::Result<()> {
            if self.fail_on == Some(sequence) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.sequences.push(sequence);
            Ok(())
        }
    }

    #[test]
    fn unbounded_never_breaks() {
        let catalog = catalog();
        let mut sink = CappedSink::new(&catalog, Vec::<Vec<FlightIndex>>::new(), None);

        for _ in 0..5 {
            assert_eq!(
                sink.emit(&[FlightIndex(0), FlightIndex(1)]),
                ControlFlow::Continue(())
            );
        }
        assert_eq!(sink.emitted(), 5);
        assert_eq!(sink.finish().unwrap().len(), 5);
    }

    #[test]
    fn breaks_exactly_at_cap() {
        let catalog = catalog();
        let mut sink = CappedSink::new(&catalog, Vec::<Vec<FlightIndex>>::new(), Some(2));

        assert_eq!(sink.emit(&[FlightIndex(0)]), ControlFlow::Continue(()));
        assert!(!sink.cap_reached());
        assert_eq!(sink.emit(&[FlightIndex(1)]), ControlFlow::Break(()));
        assert!(sink.cap_reached());

        // Nothing more gets through once the cap is hit
        assert_eq!(sink.emit(&[FlightIndex(0)]), ControlFlow::Break(()));
        assert_eq!(sink.emitted(), 2);
        assert_eq!(
            sink.finish().unwrap(),
            vec![vec![FlightIndex(0)], vec![FlightIndex(1)]]
        );
    }

    #[test]
    fn sequences_are_one_based() {
        let catalog = catalog();
        let output = Recording {
            sequences: vec![],
            fail_on: None,
        };
        let mut sink = CappedSink::new(&catalog, output, None);
        let _ = sink.emit(&[FlightIndex(0)]);
        let _ = sink.emit(&[FlightIndex(1)]);

        assert_eq!(sink.finish().unwrap().sequences, vec![1, 2]);
    }

    #[test]
    fn write_error_stops_and_surfaces() {
        let catalog = catalog();
        let output = Recording {
            sequences: vec![],
            fail_on: Some(2),
        };
        let mut sink = CappedSink::new(&catalog, output, None);

        assert_eq!(sink.emit(&[FlightIndex(0)]), ControlFlow::Continue(()));
        assert_eq!(sink.emit(&[FlightIndex(1)]), ControlFlow::Break(()));
        assert_eq!(sink.emit(&[FlightIndex(0)]), ControlFlow::Break(()));
        assert_eq!(sink.emitted(), 1);

        let err = sink.finish().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = 0;
        let mut sink = |_: &[FlightIndex]| -> ControlFlow<()> {
            seen += 1;
            ControlFlow::Continue(())
        };
        let _ = ResultSink::emit(&mut sink, &[FlightIndex(0)]);
        assert_eq!(seen, 1);
    }
}

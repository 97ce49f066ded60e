//! Reporting of found tours.
//!
//! The search hands each completed tour to an [`ItineraryWriter`], which
//! resolves it into [`LegDetail`]s, optionally enriches them with UTC times
//! and distances, and writes them in the chosen format.

mod dto;
mod enrich;

use std::io::{self, Write};

pub use dto::{ItineraryResult, LegResult};
pub use enrich::{Enricher, GeoEnricher, LegEnrichment, Location, enrich_legs, haversine_km};

use crate::domain::{AirportCode, CountryCode, Flight, FlightTime};
use crate::planner::ItineraryOutput;

/// Time format of UTC columns in line output.
const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// One reported leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegDetail {
    /// 1-based number of the tour this leg belongs to.
    pub sequence: usize,
    pub source_country: CountryCode,
    pub source: AirportCode,
    pub destination: AirportCode,
    pub departure: FlightTime,
    pub arrival: FlightTime,
    pub enrichment: Option<LegEnrichment>,
}

/// Resolve the legs of one tour, enriching them when an enricher is given.
pub fn leg_details(
    sequence: usize,
    legs: &[&Flight],
    enricher: Option<&dyn Enricher>,
) -> Vec<LegDetail> {
    let mut enrichments = enricher
        .map(|e| enrich_legs(legs, e))
        .unwrap_or_default()
        .into_iter();

    legs.iter()
        .map(|flight| LegDetail {
            sequence,
            source_country: flight.source.country,
            source: flight.source.code,
            destination: flight.destination.code,
            departure: flight.departure,
            arrival: flight.arrival,
            enrichment: enrichments.next(),
        })
        .collect()
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `seq;country;source;destination;departure;arrival` per leg
    #[default]
    Lines,
    /// One JSON object per tour per line
    Json,
}

/// Writes tours to any `io::Write`.
pub struct ItineraryWriter<'a, W> {
    out: W,
    format: OutputFormat,
    enricher: Option<&'a dyn Enricher>,
}

impl<'a, W: Write> ItineraryWriter<'a, W> {
    /// Create a writer without enrichment.
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            enricher: None,
        }
    }

    /// Enrich every written leg.
    pub fn with_enricher(mut self, enricher: &'a dyn Enricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_lines(&mut self, legs: &[LegDetail]) -> io::Result<()> {
        for leg in legs {
            write!(
                self.out,
                "{};{};{};{};{};{}",
                leg.sequence, leg.source_country, leg.source, leg.destination, leg.departure, leg.arrival
            )?;
            if self.enricher.is_some() {
                let e = leg.enrichment.as_ref();
                let utc = |t: Option<chrono::NaiveDateTime>| {
                    t.map(|t| t.format(UTC_FORMAT).to_string()).unwrap_or_default()
                };
                let km = |d: Option<f64>| d.map(|d| format!("{d:.0}")).unwrap_or_default();
                write!(
                    self.out,
                    ";{};{};{};{};{}",
                    utc(e.and_then(|e| e.departure_utc)),
                    utc(e.and_then(|e| e.arrival_utc)),
                    e.and_then(|e| e.duration)
                        .map(|d| d.num_minutes().to_string())
                        .unwrap_or_default(),
                    km(e.and_then(|e| e.distance_km)),
                    km(e.and_then(|e| e.cumulative_km)),
                )?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_json(&mut self, sequence: usize, legs: &[LegDetail]) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &ItineraryResult::new(sequence, legs))?;
        writeln!(self.out)
    }
}

impl<W: Write> ItineraryOutput for ItineraryWriter<'_, W> {
    fn write_itinerary(&mut self, sequence: usize, legs: &[&Flight]) -> io::Result<()> {
        let details = leg_details(sequence, legs, self.enricher);
        match self.format {
            OutputFormat::Lines => self.write_lines(&details),
            OutputFormat::Json => self.write_json(sequence, &details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AirportInfo, AirportTable, Catalog, Coordinates};
    use crate::domain::FlightRecord;
    use std::collections::HashMap;

    fn catalog() -> Catalog {
        let record = |src: &str, dst: &str, sc: &str, dc: &str, dep: &str, arr: &str| FlightRecord {
            source: AirportCode::parse(src).unwrap(),
            destination: AirportCode::parse(dst).unwrap(),
            source_country: CountryCode::parse(sc).unwrap(),
            destination_country: CountryCode::parse(dc).unwrap(),
            departure: FlightTime::parse(dep).unwrap(),
            arrival: FlightTime::parse(arr).unwrap(),
        };
        Catalog::from_records(vec![
            record("PRG", "VIE", "CZ", "AT", "2017-05-01 06:35:20", "2017-05-01 07:25:00"),
            record("VIE", "PRG", "AT", "CZ", "2017-05-01 12:00:00", "2017-05-01 12:50:59"),
        ])
    }

    fn write(format: OutputFormat, enricher: Option<&dyn Enricher>) -> String {
        let catalog = catalog();
        let legs: Vec<&Flight> = catalog.flights().iter().collect();
        let mut writer = ItineraryWriter::new(Vec::new(), format);
        if let Some(enricher) = enricher {
            writer = writer.with_enricher(enricher);
        }
        writer.write_itinerary(7, &legs).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn lines_truncate_to_minutes() {
        assert_eq!(
            write(OutputFormat::Lines, None),
            "7;CZ;PRG;VIE;2017-05-01T06:35;2017-05-01T07:25\n\
             7;AT;VIE;PRG;2017-05-01T12:00;2017-05-01T12:50\n"
        );
    }

    #[test]
    fn json_one_object_per_tour() {
        let out = write(OutputFormat::Json, None);
        assert_eq!(out.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["sequence"], 7);
        assert_eq!(value["legs"][0]["source"], "PRG");
        assert_eq!(value["legs"][1]["arrival"], "2017-05-01T12:50");
        assert!(value["legs"][0].get("distance_km").is_none());
    }

    #[test]
    fn enriched_lines_append_columns() {
        let mut table = AirportTable::new();
        table.insert(
            AirportCode::parse("PRG").unwrap(),
            AirportInfo {
                country: CountryCode::parse("CZ").unwrap(),
                coordinates: Some(Coordinates {
                    latitude: 50.1008,
                    longitude: 14.26,
                }),
            },
        );
        table.insert(
            AirportCode::parse("VIE").unwrap(),
            AirportInfo {
                country: CountryCode::parse("AT").unwrap(),
                coordinates: Some(Coordinates {
                    latitude: 48.1103,
                    longitude: 16.5697,
                }),
            },
        );
        let offsets = HashMap::from([(
            AirportCode::parse("PRG").unwrap(),
            chrono::FixedOffset::east_opt(7200).unwrap(),
        )]);
        let enricher = GeoEnricher::new(&table, &offsets);

        let out = write(OutputFormat::Lines, Some(&enricher as &dyn Enricher));
        let first: Vec<&str> = out.lines().next().unwrap().split(';').collect();

        assert_eq!(first.len(), 11);
        assert_eq!(first[6], "2017-05-01T04:35");
        // Vienna has no offset
        assert_eq!(first[7], "");
        assert_eq!(first[8], "");
        // Great-circle distance of 277.92 km, rounded
        assert_eq!(first[9], "278");
        assert_eq!(first[10], "278");
    }

    #[test]
    fn details_without_enricher() {
        let catalog = catalog();
        let legs: Vec<&Flight> = catalog.flights().iter().collect();
        let details = leg_details(1, &legs, None);

        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.enrichment.is_none()));
        assert_eq!(details[1].source.as_str(), "VIE");
        assert_eq!(details[1].source_country.as_str(), "AT");
    }
}

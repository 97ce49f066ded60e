//! Optional geographic and timezone enrichment of reported legs.
//!
//! Enrichment is looked up per airport code and only ever applied to tours
//! that have already been found.

use std::collections::HashMap;

use chrono::{Duration, FixedOffset, NaiveDateTime};

use crate::catalog::{AirportTable, Coordinates};
use crate::domain::{AirportCode, Flight, FlightTime};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// What an enrichment source knows about an airport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub coordinates: Option<Coordinates>,
    pub utc_offset: Option<FixedOffset>,
}

/// Source of per-airport location data.
pub trait Enricher {
    /// Look up an airport. `None` means nothing is known.
    fn locate(&self, airport: &AirportCode) -> Option<Location>;
}

/// Enricher backed by the airport table and an optional offset table.
#[derive(Debug, Clone, Default)]
pub struct GeoEnricher {
    locations: HashMap<AirportCode, Location>,
}

impl GeoEnricher {
    /// Combine coordinates from `table` with fixed UTC offsets.
    pub fn new(table: &AirportTable, offsets: &HashMap<AirportCode, FixedOffset>) -> Self {
        let mut locations: HashMap<AirportCode, Location> = table
            .iter()
            .map(|(code, info)| {
                (
                    *code,
                    Location {
                        coordinates: info.coordinates,
                        utc_offset: None,
                    },
                )
            })
            .collect();

        for (code, offset) in offsets {
            locations.entry(*code).or_default().utc_offset = Some(*offset);
        }

        Self { locations }
    }

    /// Number of airports with any location data.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if nothing is known.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Enricher for GeoEnricher {
    fn locate(&self, airport: &AirportCode) -> Option<Location> {
        self.locations.get(airport).copied()
    }
}

/// Extra per-leg data computed by enrichment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegEnrichment {
    pub departure_utc: Option<NaiveDateTime>,
    pub arrival_utc: Option<NaiveDateTime>,
    pub duration: Option<Duration>,
    pub distance_km: Option<f64>,
    /// Running total over the tour; unknown once any leg distance is unknown.
    pub cumulative_km: Option<f64>,
}

/// Great-circle distance between two points.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

fn to_utc(time: FlightTime, offset: Option<FixedOffset>) -> Option<NaiveDateTime> {
    let offset = offset?;
    time.to_datetime()
        .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
}

/// Enrich the legs of one tour, in order.
pub fn enrich_legs(legs: &[&Flight], enricher: &dyn Enricher) -> Vec<LegEnrichment> {
    let mut cumulative_km = Some(0.0);

    legs.iter()
        .map(|flight| {
            let from = enricher.locate(&flight.source.code).unwrap_or_default();
            let to = enricher.locate(&flight.destination.code).unwrap_or_default();

            let departure_utc = to_utc(flight.departure, from.utc_offset);
            let arrival_utc = to_utc(flight.arrival, to.utc_offset);
            let duration = match (departure_utc, arrival_utc) {
                (Some(dep), Some(arr)) => Some(arr.signed_duration_since(dep)),
                _ => None,
            };

            let distance_km = match (from.coordinates, to.coordinates) {
                (Some(a), Some(b)) => Some(haversine_km(a, b)),
                _ => None,
            };
            cumulative_km = cumulative_km.zip(distance_km).map(|(sum, d)| sum + d);

            LegEnrichment {
                departure_utc,
                arrival_utc,
                duration,
                distance_km,
                cumulative_km,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AirportInfo, Catalog};
    use crate::domain::{CountryCode, FlightIndex, FlightRecord};

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn coords(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    fn table() -> AirportTable {
        let mut table = AirportTable::new();
        for (c, country, location) in [
            ("PRG", "CZ", Some(coords(50.1008, 14.26))),
            ("LHR", "GB", Some(coords(51.4706, -0.461941))),
            ("JFK", "US", None),
        ] {
            table.insert(
                code(c),
                AirportInfo {
                    country: CountryCode::parse(country).unwrap(),
                    coordinates: location,
                },
            );
        }
        table
    }

    fn offsets() -> HashMap<AirportCode, FixedOffset> {
        HashMap::from([
            (code("PRG"), FixedOffset::east_opt(2 * 3600).unwrap()),
            (code("LHR"), FixedOffset::east_opt(3600).unwrap()),
        ])
    }

    fn record(src: &str, dst: &str, dep: &str, arr: &str) -> FlightRecord {
        FlightRecord {
            source: code(src),
            destination: code(dst),
            source_country: CountryCode::parse("AA").unwrap(),
            destination_country: CountryCode::parse("BB").unwrap(),
            departure: FlightTime::parse(dep).unwrap(),
            arrival: FlightTime::parse(arr).unwrap(),
        }
    }

    #[test]
    fn haversine_known_distance() {
        // Prague to London Heathrow, 1044.27 km on a 6371 km sphere
        let d = haversine_km(coords(50.1008, 14.26), coords(51.4706, -0.461941));
        assert!((d - 1044.27).abs() < 0.01, "got {d}");
    }

    #[test]
    fn haversine_zero_and_symmetric() {
        let a = coords(50.0, 14.0);
        let b = coords(-33.9, 151.2);
        assert_eq!(haversine_km(a, a), 0.0);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn geo_enricher_merges_sources() {
        let enricher = GeoEnricher::new(&table(), &offsets());

        let prg = enricher.locate(&code("PRG")).unwrap();
        assert!(prg.coordinates.is_some());
        assert_eq!(prg.utc_offset.unwrap().local_minus_utc(), 7200);

        let jfk = enricher.locate(&code("JFK")).unwrap();
        assert!(jfk.coordinates.is_none());
        assert!(jfk.utc_offset.is_none());

        assert!(enricher.locate(&code("SYD")).is_none());
        assert_eq!(enricher.len(), 3);
    }

    #[test]
    fn enrich_round_trip() {
        let catalog = Catalog::from_records(vec![
            record("PRG", "LHR", "2017-05-01 10:00:00", "2017-05-01 11:00:00"),
            record("LHR", "PRG", "2017-05-01 15:00:00", "2017-05-01 18:00:00"),
        ]);
        let legs: Vec<&Flight> = vec![&catalog[FlightIndex(0)], &catalog[FlightIndex(1)]];
        let enricher = GeoEnricher::new(&table(), &offsets());

        let enriched = enrich_legs(&legs, &enricher);

        assert_eq!(enriched.len(), 2);
        // 10:00 CEST is 08:00 UTC, 11:00 BST is 10:00 UTC
        assert_eq!(
            enriched[0].departure_utc.unwrap().to_string(),
            "2017-05-01 08:00:00"
        );
        assert_eq!(enriched[0].duration, Some(Duration::hours(2)));
        assert_eq!(enriched[1].duration, Some(Duration::hours(2)));

        let first = enriched[0].distance_km.unwrap();
        let total = enriched[1].cumulative_km.unwrap();
        assert!((total - 2.0 * first).abs() < 1e-6);
    }

    #[test]
    fn unknown_airport_leaves_fields_empty() {
        let catalog = Catalog::from_records(vec![
            record("PRG", "JFK", "2017-05-01 10:00:00", "2017-05-01 13:00:00"),
            record("JFK", "PRG", "2017-05-02 10:00:00", "2017-05-03 01:00:00"),
        ]);
        let legs: Vec<&Flight> = catalog.flights().iter().collect();
        let enricher = GeoEnricher::new(&table(), &offsets());

        let enriched = enrich_legs(&legs, &enricher);

        assert!(enriched[0].departure_utc.is_some());
        assert!(enriched[0].arrival_utc.is_none());
        assert!(enriched[0].duration.is_none());
        assert!(enriched[0].distance_km.is_none());
        assert!(enriched[1].cumulative_km.is_none());
    }
}

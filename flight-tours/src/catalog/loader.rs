//! CSV input loading.
//!
//! Reads the airport dataset, the flight list and the optional UTC offset
//! table. Records whose airports cannot be resolved to a country are dropped
//! and reported as a diagnostic set; structural problems abort loading.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::FixedOffset;
use serde::Deserialize;
use tracing::{debug, trace};

use super::codes::{AirportInfo, AirportTable, Coordinates};
use super::error::LoadError;
use crate::domain::{AirportCode, CountryCode, FlightRecord, FlightTime};

/// Default delimiter of the flight list.
pub const DEFAULT_FLIGHT_DELIMITER: u8 = b';';

/// Result of loading the flight list.
#[derive(Debug, Clone, Default)]
pub struct LoadedFlights {
    /// Records with both airports resolved.
    pub records: Vec<FlightRecord>,
    /// Codes that could not be resolved, sorted. Malformed codes are kept
    /// as they appeared in the input.
    pub missing: BTreeSet<String>,
}

/// A row of the flight list.
#[derive(Debug, Deserialize)]
struct FlightRow {
    source: String,
    destination: String,
    local_departure_time: String,
    local_arrival_time: String,
}

/// A row of an OurAirports-style dataset.
#[derive(Debug, Deserialize)]
struct AirportRow {
    iata_code: Option<String>,
    iso_country: Option<String>,
    latitude_deg: Option<f64>,
    longitude_deg: Option<f64>,
}

/// A row of the UTC offset table.
#[derive(Debug, Deserialize)]
struct OffsetRow {
    iata_code: String,
    utc_offset_minutes: i32,
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the airport dataset on top of the built-in supplement.
///
/// Rows without a valid IATA code or country are skipped.
pub fn load_airports<R: Read>(reader: R) -> Result<AirportTable, LoadError> {
    let mut table = AirportTable::with_supplement();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut skipped = 0usize;
    for result in rdr.deserialize::<AirportRow>() {
        let row = result?;
        let code = row.iata_code.as_deref().map(AirportCode::parse);
        let country = row.iso_country.as_deref().map(CountryCode::parse);
        let (Some(Ok(code)), Some(Ok(country))) = (code, country) else {
            skipped += 1;
            continue;
        };

        let coordinates = match (row.latitude_deg, row.longitude_deg) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };
        table.insert(
            code,
            AirportInfo {
                country,
                coordinates,
            },
        );
    }

    debug!(airports = table.len(), skipped, "Loaded airport table");
    Ok(table)
}

/// Load the airport dataset from a file.
pub fn load_airports_from_path(path: &Path) -> Result<AirportTable, LoadError> {
    load_airports(open(path)?)
}

/// Load the flight list, resolving airports through `table`.
///
/// Every unresolvable code on a record joins `missing` and the record is
/// dropped. A code that is not a valid IATA code counts as unresolvable.
/// Malformed timestamps and broken CSV structure are fatal.
pub fn load_flights<R: Read>(
    reader: R,
    table: &AirportTable,
    delimiter: u8,
) -> Result<LoadedFlights, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut loaded = LoadedFlights::default();
    for (idx, result) in rdr.deserialize::<FlightRow>().enumerate() {
        let record = idx + 1;
        let row = result?;

        let parse_time =
            |s: &str| FlightTime::parse(s).map_err(|source| LoadError::InvalidTime { record, source });
        let departure = parse_time(&row.local_departure_time)?;
        let arrival = parse_time(&row.local_arrival_time)?;

        let source = resolve(&row.source, table, &mut loaded.missing);
        let destination = resolve(&row.destination, table, &mut loaded.missing);
        let (Some((source, source_country)), Some((destination, destination_country))) =
            (source, destination)
        else {
            trace!(
                record,
                source = %row.source,
                destination = %row.destination,
                "Dropping flight with unresolved airport"
            );
            continue;
        };

        loaded.records.push(FlightRecord {
            source,
            destination,
            source_country,
            destination_country,
            departure,
            arrival,
        });
    }

    debug!(
        flights = loaded.records.len(),
        missing = loaded.missing.len(),
        "Loaded flight list"
    );
    Ok(loaded)
}

/// Resolve one airport field, recording it in `missing` when it is malformed
/// or unknown to the table.
fn resolve(
    field: &str,
    table: &AirportTable,
    missing: &mut BTreeSet<String>,
) -> Option<(AirportCode, CountryCode)> {
    let resolved = AirportCode::parse(field)
        .ok()
        .and_then(|code| table.country(&code).map(|country| (code, country)));
    if resolved.is_none() {
        missing.insert(field.to_string());
    }
    resolved
}

/// Load the flight list from a file.
pub fn load_flights_from_path(
    path: &Path,
    table: &AirportTable,
    delimiter: u8,
) -> Result<LoadedFlights, LoadError> {
    load_flights(open(path)?, table, delimiter)
}

/// Load fixed UTC offsets per airport.
pub fn load_utc_offsets<R: Read>(
    reader: R,
) -> Result<HashMap<AirportCode, FixedOffset>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut offsets = HashMap::new();
    for (idx, result) in rdr.deserialize::<OffsetRow>().enumerate() {
        let record = idx + 1;
        let row = result?;
        let code = AirportCode::parse(&row.iata_code)
            .map_err(|source| LoadError::InvalidAirportCode { record, source })?;
        let offset = row
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(LoadError::InvalidOffset {
                record,
                minutes: row.utc_offset_minutes,
            })?;
        offsets.insert(code, offset);
    }

    Ok(offsets)
}

/// Load UTC offsets from a file.
pub fn load_utc_offsets_from_path(
    path: &Path,
) -> Result<HashMap<AirportCode, FixedOffset>, LoadError> {
    load_utc_offsets(open(path)?)
}

//! Airport code to country/location lookup.

use std::collections::HashMap;

use crate::domain::{AirportCode, CountryCode};

/// Codes that appear in flight data but are absent from the public airport
/// dataset, with their countries.
const SUPPLEMENT: &[(&str, &str)] = &[
    ("PEK", "CN"),
    ("ONK", "RU"),
    ("AGM", "GL"),
    ("FLZ", "ID"),
    ("KUZ", "KR"),
    ("MLH", "FR"),
    ("ZGS", "CA"),
    ("PLX", "KZ"),
    ("AOQ", "GL"),
    ("SGN", "VN"),
    ("TWT", "PH"),
    ("LPF", "CN"),
    ("THD", "VN"),
];

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the table knows about one airport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirportInfo {
    pub country: CountryCode,
    pub coordinates: Option<Coordinates>,
}

/// Lookup from IATA code to country and (optionally) coordinates.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    entries: HashMap<AirportCode, AirportInfo>,
}

impl AirportTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding only the built-in supplement.
    pub fn with_supplement() -> Self {
        let mut table = Self::new();
        for (code, country) in SUPPLEMENT {
            if let (Ok(code), Ok(country)) = (AirportCode::parse(code), CountryCode::parse(country))
            {
                table.insert(
                    code,
                    AirportInfo {
                        country,
                        coordinates: None,
                    },
                );
            }
        }
        table
    }

    /// Insert or replace an airport.
    pub fn insert(&mut self, code: AirportCode, info: AirportInfo) {
        self.entries.insert(code, info);
    }

    /// Look up everything known about an airport.
    pub fn get(&self, code: &AirportCode) -> Option<&AirportInfo> {
        self.entries.get(code)
    }

    /// Resolve an airport to its country.
    pub fn country(&self, code: &AirportCode) -> Option<CountryCode> {
        self.entries.get(code).map(|info| info.country)
    }

    /// Iterate over all known airports.
    pub fn iter(&self) -> impl Iterator<Item = (&AirportCode, &AirportInfo)> {
        self.entries.iter()
    }

    /// Returns the number of known airports.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    #[test]
    fn supplement_resolves_known_gaps() {
        let table = AirportTable::with_supplement();
        assert_eq!(table.len(), SUPPLEMENT.len());
        assert_eq!(table.country(&code("PEK")).unwrap().as_str(), "CN");
        assert_eq!(table.country(&code("MLH")).unwrap().as_str(), "FR");
        assert!(table.get(&code("PEK")).unwrap().coordinates.is_none());
    }

    #[test]
    fn unknown_code_is_none() {
        let table = AirportTable::with_supplement();
        assert!(table.country(&code("PRG")).is_none());
    }

    #[test]
    fn insert_replaces() {
        let mut table = AirportTable::with_supplement();
        table.insert(
            code("PEK"),
            AirportInfo {
                country: CountryCode::parse("CN").unwrap(),
                coordinates: Some(Coordinates {
                    latitude: 40.08,
                    longitude: 116.58,
                }),
            },
        );
        assert_eq!(table.len(), SUPPLEMENT.len());
        assert!(table.get(&code("PEK")).unwrap().coordinates.is_some());
    }
}

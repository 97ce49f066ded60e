//! IATA airport codes.

use std::fmt;

/// Error returned when a string is not a well-formed IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAirportCode {
    /// Not three characters long
    #[error("IATA code {input:?} has {len} characters, expected 3")]
    Length { input: String, len: usize },

    /// Three characters, but not all of them uppercase A-Z
    #[error("IATA code {input:?} contains {found:?}, expected uppercase A-Z")]
    Letter { input: String, found: char },
}

/// A 3-letter IATA airport code such as `PRG`.
///
/// Only the plain uppercase form is accepted; flight data never carries
/// lowercase or ICAO (4-letter) codes, so those are reported rather than
/// normalised.
///
/// ```
/// use flight_tours::domain::AirportCode;
///
/// let prg = AirportCode::parse("PRG").unwrap();
/// assert_eq!(prg.to_string(), "PRG");
///
/// assert!(AirportCode::parse("LKPR").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code.
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        if let &[a, b, c] = s.as_bytes() {
            if [a, b, c].iter().all(u8::is_ascii_uppercase) {
                return Ok(Self([a, b, c]));
            }
        }

        let len = s.chars().count();
        match s.chars().find(|c| !c.is_ascii_uppercase()) {
            Some(found) if len == 3 => Err(InvalidAirportCode::Letter {
                input: s.to_string(),
                found,
            }),
            _ => Err(InvalidAirportCode::Length {
                input: s.to_string(),
                len,
            }),
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

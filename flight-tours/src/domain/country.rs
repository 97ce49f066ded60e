//! Country code types.

use std::fmt;

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code {input:?}: expected 2 uppercase ASCII letters")]
pub struct InvalidCountryCode {
    input: String,
}

/// An ISO 3166-1 alpha-2 country code, e.g. `CZ`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a country code. The input must be exactly 2 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        match s.as_bytes() {
            [a, b] if a.is_ascii_uppercase() && b.is_ascii_uppercase() => {
                Ok(CountryCode([*a, *b]))
            }
            _ => Err(InvalidCountryCode {
                input: s.to_string(),
            }),
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!(CountryCode::parse("CZ").unwrap().as_str(), "CZ");
        assert_eq!(CountryCode::parse("GL").unwrap().to_string(), "GL");
    }

    #[test]
    fn parse_invalid() {
        assert!(CountryCode::parse("").is_err());
        assert!(CountryCode::parse("C").is_err());
        assert!(CountryCode::parse("cz").is_err());
        assert!(CountryCode::parse("CZE").is_err());
        assert!(CountryCode::parse("C1").is_err());
    }

    #[test]
    fn equality_and_order() {
        let cz = CountryCode::parse("CZ").unwrap();
        let de = CountryCode::parse("DE").unwrap();
        assert_ne!(cz, de);
        assert!(cz < de);
    }
}

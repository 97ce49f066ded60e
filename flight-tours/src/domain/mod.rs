//! Domain types for the flight tour planner.
//!
//! This module contains the validated value types shared by loading, search
//! and reporting. All types enforce their invariants at construction time, so
//! code that receives these types can trust their validity.

mod airport;
mod country;
mod flight;
mod time;

pub use airport::{AirportCode, InvalidAirportCode};
pub use country::{CountryCode, InvalidCountryCode};
pub use flight::{AirportId, Flight, FlightIndex, FlightRecord, Stop};
pub use time::{FlightTime, TimeError};

//! Round-trip tour search.
//!
//! Given a catalog sorted by departure, this module enumerates fixed-length
//! chains of flights that start with an international flight, change country
//! on every stop and land back at the origin airport before the trip
//! deadline.
//!
//! The search is a depth-first backtracking walk over a per-airport index of
//! outgoing flights. Each airport keeps a resume cursor that moves past
//! flights no later root can use, so repeated scans of busy airports stay
//! short.

mod airport_index;
mod config;
mod search;
mod sink;

pub use airport_index::{AirportEntry, AirportIndex};
pub use config::{ConfigError, SearchConfig};
pub use search::{ChainSearch, PlanError, PlanOutcome, Planner, SearchSummary};
pub use sink::{CappedSink, ItineraryOutput, ResultSink};

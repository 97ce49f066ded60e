//! Serializable views of reported tours.

use serde::Serialize;

use super::{LegDetail, UTC_FORMAT};

/// A tour as written in JSON output.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// 1-based sequence number
    pub sequence: usize,

    /// Legs in flight order
    pub legs: Vec<LegResult>,
}

/// One leg of a tour.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Source country code
    pub source_country: String,

    /// Source airport code
    pub source: String,

    /// Destination airport code
    pub destination: String,

    /// Local departure, minute precision
    pub departure: String,

    /// Local arrival, minute precision
    pub arrival: String,

    /// Departure in UTC (enriched output only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_utc: Option<String>,

    /// Arrival in UTC (enriched output only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_utc: Option<String>,

    /// Flight duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_mins: Option<i64>,

    /// Great-circle distance in kilometres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,

    /// Distance flown so far in this tour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_km: Option<f64>,
}

impl From<&LegDetail> for LegResult {
    fn from(leg: &LegDetail) -> Self {
        let enrichment = leg.enrichment.as_ref();
        Self {
            source_country: leg.source_country.to_string(),
            source: leg.source.to_string(),
            destination: leg.destination.to_string(),
            departure: leg.departure.to_string(),
            arrival: leg.arrival.to_string(),
            departure_utc: enrichment
                .and_then(|e| e.departure_utc)
                .map(|t| t.format(UTC_FORMAT).to_string()),
            arrival_utc: enrichment
                .and_then(|e| e.arrival_utc)
                .map(|t| t.format(UTC_FORMAT).to_string()),
            duration_mins: enrichment.and_then(|e| e.duration).map(|d| d.num_minutes()),
            distance_km: enrichment.and_then(|e| e.distance_km),
            cumulative_km: enrichment.and_then(|e| e.cumulative_km),
        }
    }
}

impl ItineraryResult {
    /// Build from resolved legs of one tour.
    pub fn new(sequence: usize, legs: &[LegDetail]) -> Self {
        Self {
            sequence,
            legs: legs.iter().map(LegResult::from).collect(),
        }
    }
}

//! Round-trip flight tour planner.
//!
//! Enumerates fixed-length tours through a flight catalog that leave the
//! home country, visit a new country on every stop and return to the origin
//! airport within a bounded trip span.

pub mod catalog;
pub mod domain;
pub mod planner;
pub mod report;

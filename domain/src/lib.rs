//! Domain layer for aqi-herald
//!
//! This crate contains the core business rules for air-quality reporting.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Reading
//!
//! A reading is the AQI value scraped for one city, kept in its validated
//! decimal string form. Readings that are not plain non-negative integers
//! (placeholders like `"-"` or `"N/A"`) never enter an [`AggregateReport`].
//!
//! ## Severity band
//!
//! [`SeverityBand`] is the categorical health-risk label derived from a
//! reading on demand. It is computed, never stored.

pub mod air_quality;

// Re-export commonly used types
pub use air_quality::{
    outcome::FetchOutcome,
    report::AggregateReport,
    severity::SeverityBand,
};

//! AQI source port
//!
//! Defines the interface for retrieving one city's raw reading.

use async_trait::async_trait;
use herald_domain::FetchOutcome;

/// Source of per-city AQI readings.
///
/// Implementations issue a single retrieval per call with no built-in
/// retry. The operation is infallible by construction: transport failures
/// and non-success statuses are captured as [`FetchOutcome`] variants, never
/// propagated as errors — the caller must never see a fault escape.
#[async_trait]
pub trait AqiSource: Send + Sync {
    /// Fetch the raw reading for one city identifier.
    async fn fetch(&self, city: &str) -> FetchOutcome;
}

//! Aggregate report entity.

use crate::air_quality::severity::SeverityBand;
use std::collections::BTreeMap;

/// Ordered-by-key mapping from city identifier to its validated AQI reading.
///
/// Invariant: every stored value is a non-negative integer in decimal string
/// form. Cities without a valid reading are absent, never stored as a
/// placeholder. Built once per run and immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    readings: BTreeMap<String, String>,
}

impl AggregateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validated reading for a city.
    ///
    /// Callers are expected to have run the reading through
    /// [`FetchOutcome::into_valid_reading`](crate::FetchOutcome::into_valid_reading)
    /// first; this method does not re-validate.
    pub fn insert(&mut self, city: impl Into<String>, reading: impl Into<String>) {
        self.readings.insert(city.into(), reading.into());
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Iterate readings in stable city order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.readings.iter().map(|(c, r)| (c.as_str(), r.as_str()))
    }

    /// Render the deterministic city/reading/band listing.
    ///
    /// One `- {city}: AQI = {reading} ({band})` line per city, sorted by
    /// city identifier, each line newline-terminated. Both the LLM prompt
    /// and the fallback report are built from this exact text, so fallback
    /// output is byte-for-byte reproducible from the report alone.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (city, reading) in self.iter() {
            let band = SeverityBand::classify(reading);
            out.push_str(&format!("- {}: AQI = {} ({})\n", city, reading, band));
        }
        out
    }
}

impl FromIterator<(String, String)> for AggregateReport {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            readings: iter.into_iter().collect(),
        }
    }
}

//! Severity band classification.
//!
//! Maps a raw AQI reading to one of six categorical health-risk bands.
//! Classification is pure and total: anything that does not parse as an
//! integer inside a known band comes back as [`SeverityBand::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical health-risk label derived from an AQI reading.
///
/// Derived on demand via [`classify`](Self::classify); never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityBand {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    Unknown,
}

impl SeverityBand {
    /// Classify a reading string into its severity band.
    ///
    /// Band thresholds (inclusive, open-ended top):
    ///
    /// | Range   | Band                  |
    /// |---------|-----------------------|
    /// | 0–50    | Good                  |
    /// | 51–100  | Moderate              |
    /// | 101–150 | UnhealthyForSensitive |
    /// | 151–200 | Unhealthy             |
    /// | 201–300 | VeryUnhealthy         |
    /// | >300    | Hazardous             |
    ///
    /// Parse failures return [`Unknown`](Self::Unknown). Negative integers
    /// are covered by no band and also fall through to `Unknown`; there is
    /// intentionally no explicit negative branch.
    pub fn classify(reading: &str) -> Self {
        let Ok(value) = reading.trim().parse::<i64>() else {
            return Self::Unknown;
        };

        match value {
            0..=50 => Self::Good,
            51..=100 => Self::Moderate,
            101..=150 => Self::UnhealthyForSensitive,
            151..=200 => Self::Unhealthy,
            201..=300 => Self::VeryUnhealthy,
            v if v > 300 => Self::Hazardous,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "UnhealthyForSensitive",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "VeryUnhealthy",
            Self::Hazardous => "Hazardous",
            Self::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_band_boundaries() {
        assert_eq!(SeverityBand::classify("0"), SeverityBand::Good);
        assert_eq!(SeverityBand::classify("50"), SeverityBand::Good);
        assert_eq!(SeverityBand::classify("51"), SeverityBand::Moderate);
        assert_eq!(SeverityBand::classify("100"), SeverityBand::Moderate);
        assert_eq!(
            SeverityBand::classify("101"),
            SeverityBand::UnhealthyForSensitive
        );
        assert_eq!(
            SeverityBand::classify("150"),
            SeverityBand::UnhealthyForSensitive
        );
        assert_eq!(SeverityBand::classify("151"), SeverityBand::Unhealthy);
        assert_eq!(SeverityBand::classify("200"), SeverityBand::Unhealthy);
        assert_eq!(SeverityBand::classify("201"), SeverityBand::VeryUnhealthy);
        assert_eq!(SeverityBand::classify("300"), SeverityBand::VeryUnhealthy);
        assert_eq!(SeverityBand::classify("301"), SeverityBand::Hazardous);
        assert_eq!(SeverityBand::classify("9999"), SeverityBand::Hazardous);
    }

    #[test]
    fn classify_non_numeric_is_unknown() {
        assert_eq!(SeverityBand::classify("N/A"), SeverityBand::Unknown);
        assert_eq!(SeverityBand::classify("-"), SeverityBand::Unknown);
        assert_eq!(SeverityBand::classify(""), SeverityBand::Unknown);
        assert_eq!(SeverityBand::classify("42.5"), SeverityBand::Unknown);
    }

    #[test]
    fn classify_negative_is_unknown() {
        // Negative readings match no band; they fall through to Unknown.
        assert_eq!(SeverityBand::classify("-1"), SeverityBand::Unknown);
        assert_eq!(SeverityBand::classify("-300"), SeverityBand::Unknown);
    }

    #[test]
    fn classify_tolerates_surrounding_whitespace() {
        assert_eq!(SeverityBand::classify(" 42 "), SeverityBand::Good);
    }

    #[test]
    fn display_matches_report_line_spelling() {
        assert_eq!(
            SeverityBand::UnhealthyForSensitive.to_string(),
            "UnhealthyForSensitive"
        );
        assert_eq!(SeverityBand::VeryUnhealthy.to_string(), "VeryUnhealthy");
    }
}

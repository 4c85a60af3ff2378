//! Air-quality entities and rules.

pub mod outcome;
pub mod report;
pub mod severity;

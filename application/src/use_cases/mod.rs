//! Use cases orchestrating the report pipeline.

pub mod aggregate_readings;
pub mod compose_report;
pub mod run_report;

//! Application layer for aqi-herald
//!
//! Use cases and ports. The ports define how the pipeline reaches its
//! external collaborators (the AQI page source, the text-generation
//! service, and the tool-invocation publisher); the adapters live in the
//! infrastructure layer.
//!
//! # Pipeline
//!
//! ```text
//! AggregateReadings ──► ComposeReport ──► MessagePublisher
//!   (fan-out/fan-in)      (LLM or fallback)   (post to channel)
//! ```

pub mod ports;
pub mod use_cases;

pub use ports::{
    aqi_source::AqiSource,
    publisher::{MessagePublisher, PublishError},
    summarizer::{SummarizeError, Summarizer},
};
pub use use_cases::{
    aggregate_readings::AggregateReadingsUseCase,
    compose_report::{ComposeReportUseCase, NO_DATA_TEXT},
    run_report::{PublishPolicy, RunOutcome, RunReportError, RunReportInput, RunReportUseCase},
};

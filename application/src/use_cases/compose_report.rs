//! Compose report use case.
//!
//! Turns an [`AggregateReport`] into the summary text: a model-generated
//! narrative when the text-generation service cooperates, or a
//! deterministic plain-text report when it does not. The fallback is built
//! from the same sorted listing as the prompt, so it is byte-for-byte
//! reproducible from the report alone.

use crate::ports::summarizer::Summarizer;
use herald_domain::AggregateReport;
use std::sync::Arc;
use tracing::{info, warn};

/// Fixed text returned for an empty report, without touching the service.
pub const NO_DATA_TEXT: &str = "No air quality data available for the configured cities.";

/// Header line of the deterministic fallback report.
const FALLBACK_HEADER: &str = "Air Quality Index Report:\n";

/// Use case for producing the human-readable summary.
pub struct ComposeReportUseCase {
    summarizer: Arc<dyn Summarizer>,
}

impl ComposeReportUseCase {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Produce the summary text for `report`. Never fails.
    pub async fn execute(&self, report: &AggregateReport) -> String {
        if report.is_empty() {
            info!("No readings collected; skipping summarization");
            return NO_DATA_TEXT.to_string();
        }

        let prompt = build_prompt(report);
        match self.summarizer.summarize(&prompt).await {
            Ok(summary) => summary.trim().to_string(),
            Err(e) => {
                warn!("Summarization failed, using deterministic fallback: {}", e);
                fallback_report(report)
            }
        }
    }
}

/// Build the deterministic prompt listing each city, its reading, and its
/// classified band in stable city order.
pub fn build_prompt(report: &AggregateReport) -> String {
    format!(
        "Summarize the current air quality index for the following cities based on \
         the provided AQI values.\n\
         For each city, include the AQI value and a brief description of what that \
         AQI level means for health.\n\
         Also, provide an overall summary of the air quality situation across these \
         cities.\n\n\
         Air Quality Data:\n{}",
        report.listing()
    )
}

/// The deterministic fallback: header plus the sorted listing.
pub fn fallback_report(report: &AggregateReport) -> String {
    format!("{}{}", FALLBACK_HEADER, report.listing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::summarizer::SummarizeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub summarizer with a canned response and a call counter, so tests
    /// can prove the service was (or was not) invoked.
    struct StubSummarizer {
        response: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl StubSummarizer {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Summarizer for StubSummarizer {
        async fn summarize(&self, _prompt: &str) -> Result<String, SummarizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .map_err(|_| SummarizeError::ServiceUnavailable("stubbed outage".into()))
        }
    }

    fn sample_report() -> AggregateReport {
        let mut report = AggregateReport::new();
        report.insert("jakarta", "55");
        report.insert("bandung", "120");
        report
    }

    #[tokio::test]
    async fn empty_report_returns_fixed_text_without_calling_service() {
        let summarizer = Arc::new(StubSummarizer::ok("should not be used"));
        let use_case = ComposeReportUseCase::new(summarizer.clone());

        let text = use_case.execute(&AggregateReport::new()).await;

        assert_eq!(text, NO_DATA_TEXT);
        assert_eq!(summarizer.call_count(), 0);
    }

    #[tokio::test]
    async fn successful_summarization_returns_model_text() {
        let summarizer = Arc::new(StubSummarizer::ok("  Air is mostly fine today.  "));
        let use_case = ComposeReportUseCase::new(summarizer.clone());

        let text = use_case.execute(&sample_report()).await;

        assert_eq!(text, "Air is mostly fine today.");
        assert_eq!(summarizer.call_count(), 1);
    }

    #[tokio::test]
    async fn failure_falls_back_to_deterministic_report() {
        let summarizer = Arc::new(StubSummarizer::failing());
        let use_case = ComposeReportUseCase::new(summarizer);

        let text = use_case.execute(&sample_report()).await;

        assert_eq!(
            text,
            "Air Quality Index Report:\n\
             - bandung: AQI = 120 (UnhealthyForSensitive)\n\
             - jakarta: AQI = 55 (Moderate)\n"
        );
    }

    #[tokio::test]
    async fn fallback_equals_report_built_from_listing() {
        let report = sample_report();
        assert_eq!(
            fallback_report(&report),
            format!("Air Quality Index Report:\n{}", report.listing())
        );
    }

    #[test]
    fn prompt_lists_cities_in_stable_order() {
        let prompt = build_prompt(&sample_report());
        let bandung = prompt.find("- bandung: AQI = 120").unwrap();
        let jakarta = prompt.find("- jakarta: AQI = 55").unwrap();
        assert!(bandung < jakarta);
        assert!(prompt.contains("Air Quality Data:"));
    }
}

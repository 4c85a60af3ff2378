//! Run report use case.
//!
//! Drives the whole single-shot pipeline: aggregate readings, compose the
//! summary, publish it. Everything before and after the aggregation join is
//! strictly sequential.

use crate::ports::aqi_source::AqiSource;
use crate::ports::publisher::{MessagePublisher, PublishError};
use crate::ports::summarizer::Summarizer;
use crate::use_cases::aggregate_readings::AggregateReadingsUseCase;
use crate::use_cases::compose_report::ComposeReportUseCase;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can abort a report run.
#[derive(Error, Debug)]
pub enum RunReportError {
    #[error("Publish failed: {0}")]
    PublishFailed(#[from] PublishError),
}

/// How a publish failure affects the run as a whole.
///
/// The observed behavior of the system this replaces was to swallow publish
/// failures; [`BestEffort`](Self::BestEffort) preserves that. Deployments
/// that need a failure signal select [`Strict`](Self::Strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishPolicy {
    /// Log the failure and complete the run normally.
    #[default]
    BestEffort,
    /// Escalate the failure to [`RunReportError::PublishFailed`].
    Strict,
}

/// Input for the [`RunReportUseCase`].
#[derive(Debug, Clone)]
pub struct RunReportInput {
    /// City identifiers to fetch, from the configured static list.
    pub cities: Vec<String>,
    /// Target channel identifier.
    pub channel: String,
    /// Publish failure policy.
    pub policy: PublishPolicy,
}

impl RunReportInput {
    pub fn new(cities: Vec<String>, channel: impl Into<String>) -> Self {
        Self {
            cities,
            channel: channel.into(),
            policy: PublishPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PublishPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The summary text that was (or would have been) posted.
    pub summary: String,
    /// Number of cities with a valid reading in the report.
    pub cities_reported: usize,
    /// Whether the publish step succeeded.
    pub published: bool,
}

/// Use case driving the full scrape → summarize → post pipeline.
pub struct RunReportUseCase {
    aggregate: AggregateReadingsUseCase,
    compose: ComposeReportUseCase,
    publisher: Arc<dyn MessagePublisher>,
}

impl RunReportUseCase {
    pub fn new(
        source: Arc<dyn AqiSource>,
        summarizer: Arc<dyn Summarizer>,
        publisher: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self {
            aggregate: AggregateReadingsUseCase::new(source),
            compose: ComposeReportUseCase::new(summarizer),
            publisher,
        }
    }

    /// Execute the pipeline end to end.
    ///
    /// A best-effort report is produced and a publish attempted even when
    /// every per-city fetch failed. Under [`PublishPolicy::BestEffort`] the
    /// only error path out of here is unreachable; under
    /// [`PublishPolicy::Strict`] a publish failure aborts with
    /// [`RunReportError::PublishFailed`].
    pub async fn execute(&self, input: RunReportInput) -> Result<RunOutcome, RunReportError> {
        info!("Fetching air quality data for {} cities", input.cities.len());
        let report = self.aggregate.execute(&input.cities).await;

        let summary = self.compose.execute(&report).await;

        let published = match self.publisher.post_message(&input.channel, &summary).await {
            Ok(()) => {
                info!("Report posted to channel {}", input.channel);
                true
            }
            Err(e) => {
                warn!("Failed to post report: {}", e);
                if input.policy == PublishPolicy::Strict {
                    return Err(e.into());
                }
                false
            }
        };

        Ok(RunOutcome {
            summary,
            cities_reported: report.len(),
            published,
        })
    }
}

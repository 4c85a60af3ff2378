//! Summarizer port
//!
//! Defines the interface for the external text-generation service.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the text-generation service.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Summarization service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Text-generation service turning a prompt into a narrative summary.
///
/// Callers treat any failure as a signal to fall back to a deterministic
/// plain-text report; no error from this port aborts the run.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate free text from a single free-text prompt.
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError>;
}

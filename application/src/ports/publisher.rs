//! Message publisher port
//!
//! Defines the interface for posting the summary to a messaging channel.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the publish transport.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Publish transport failure: {0}")]
    TransportFailure(String),
}

/// Publisher delivering report text to a named channel.
///
/// Implementations delegate to a remote tool-invocation transport; the
/// run-level handling of a failure here is a policy decision made by the
/// caller, not by the adapter.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Post `text` to the channel identified by `channel`.
    async fn post_message(&self, channel: &str, text: &str) -> Result<(), PublishError>;
}

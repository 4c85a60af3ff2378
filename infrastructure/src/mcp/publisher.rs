//! Message publisher backed by the Slack tool server.
//!
//! Adapts [`McpClient::call_tool`] to the application's
//! [`MessagePublisher`] port. Failure stays inside [`PublishError`]; the
//! run-level reaction is the caller's policy, not this adapter's.

use crate::mcp::client::McpClient;
use async_trait::async_trait;
use herald_application::{MessagePublisher, PublishError};
use std::sync::Arc;
use tracing::debug;

/// Name of the remote tool used to post the report.
pub const POST_MESSAGE_TOOL: &str = "slack_post_message";

/// Publisher invoking the `slack_post_message` tool.
pub struct SlackToolPublisher {
    client: Arc<McpClient>,
}

impl SlackToolPublisher {
    pub fn new(client: Arc<McpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessagePublisher for SlackToolPublisher {
    async fn post_message(&self, channel: &str, text: &str) -> Result<(), PublishError> {
        let arguments = serde_json::json!({
            "channel_id": channel,
            "text": text,
        });

        let result = self
            .client
            .call_tool(POST_MESSAGE_TOOL, arguments)
            .await
            .map_err(|e| PublishError::TransportFailure(e.to_string()))?;

        if result.is_error {
            return Err(PublishError::TransportFailure(result.text()));
        }

        debug!("Posted {} bytes to channel {}", text.len(), channel);
        Ok(())
    }
}

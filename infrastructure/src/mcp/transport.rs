//! Frame classification for incoming JSON-RPC messages.
//!
//! The background reader task classifies every frame read from the tool
//! server's stdout before dispatching it: responses are correlated to
//! pending requests, notifications are informational, and incoming
//! server-side requests (which this client does not serve) are rejected.

/// Classification of an incoming JSON-RPC message.
#[derive(Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// A response to a request we sent (has `id`, no `method`).
    Response,
    /// A request from the server (has `id` + `method`), e.g. `ping` or a
    /// sampling request.
    IncomingRequest { id: u64 },
    /// A notification (has `method`, no `id`), e.g. progress or log events.
    Notification,
}

/// Classify a JSON-RPC message by inspecting `id` and `method` fields.
///
/// Pure function with no side effects, called once per frame in the reader
/// loop.
pub fn classify_message(json: &serde_json::Value) -> MessageKind {
    let has_id = json.get("id").and_then(|v| v.as_u64());
    let has_method = json.get("method").and_then(|v| v.as_str());

    match (has_id, has_method) {
        (Some(id), Some(_)) => MessageKind::IncomingRequest { id },
        (Some(_), None) => MessageKind::Response,
        _ => MessageKind::Notification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_response() {
        let json = serde_json::json!({"id": 1, "result": {}});
        assert_eq!(classify_message(&json), MessageKind::Response);
    }

    #[test]
    fn classify_incoming_request() {
        let json = serde_json::json!({"id": 3, "method": "ping"});
        assert_eq!(
            classify_message(&json),
            MessageKind::IncomingRequest { id: 3 }
        );
    }

    #[test]
    fn classify_notification() {
        let json = serde_json::json!({"method": "notifications/progress", "params": {}});
        assert_eq!(classify_message(&json), MessageKind::Notification);
    }

    #[test]
    fn classify_no_id_no_method() {
        // Edge case: neither id nor method → treated as Notification
        let json = serde_json::json!({"data": "something"});
        assert_eq!(classify_message(&json), MessageKind::Notification);
    }
}

//! MCP stdio tool-server client.
//!
//! Spawns an external tool server and speaks JSON-RPC 2.0 over its
//! stdin/stdout, newline-delimited. The client performs the `initialize`
//! handshake, can list the server's tools for diagnostics, and invokes
//! named tools with structured arguments.

pub mod client;
pub mod error;
pub mod protocol;
pub mod publisher;
pub mod transport;

pub use client::McpClient;
pub use error::{McpError, Result};
pub use publisher::SlackToolPublisher;

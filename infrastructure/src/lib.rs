//! Infrastructure layer for aqi-herald
//!
//! Adapters implementing the application ports against the real world:
//!
//! - [`aqicn`] — per-city AQI page scraping (reqwest + scraper)
//! - [`openai`] — chat-completions summarization
//! - [`mcp`] — stdio tool-server client and the Slack publisher built on it
//! - [`config`] — figment-based configuration loading

pub mod aqicn;
pub mod config;
pub mod mcp;
pub mod openai;

pub use aqicn::AqicnSource;
pub use config::{ConfigLoader, FileConfig};
pub use mcp::{McpClient, McpError, SlackToolPublisher};
pub use openai::OpenAiSummarizer;

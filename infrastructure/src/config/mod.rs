//! Configuration loading.

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, OpenAiConfig, ScrapeConfig, SlackConfig, ToolServerConfig,
};
pub use loader::ConfigLoader;

//! Configuration file structure.
//!
//! Loaded once at startup by [`ConfigLoader`](super::ConfigLoader) and
//! passed by reference to the components that need it; nothing reads
//! configuration ambiently after that.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub openai: OpenAiConfig,
    pub slack: SlackConfig,
    pub scrape: ScrapeConfig,
    pub tool_server: ToolServerConfig,
}

/// Text-generation service credentials and model choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key; typically supplied via `HERALD_OPENAI__API_KEY`.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

/// Slack workspace identifiers handed to the tool server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Bot token; typically supplied via `HERALD_SLACK__BOT_TOKEN`.
    pub bot_token: String,
    pub team_id: String,
    /// Channel the report is posted to.
    pub channel_id: String,
}

/// Scraping target and city list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    /// City identifiers, used both as URL path segments and report keys.
    pub cities: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://aqicn.org/city/indonesia".to_string(),
            cities: default_cities(),
        }
    }
}

/// Command line of the tool server process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolServerConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for ToolServerConfig {
    fn default() -> Self {
        Self {
            command: "npx".to_string(),
            args: vec![
                "-y".to_string(),
                "@modelcontextprotocol/server-slack".to_string(),
            ],
        }
    }
}

fn default_cities() -> Vec<String> {
    [
        "jakarta",
        "surabaya",
        "bandung",
        "medan",
        "semarang",
        "palembang",
        "makassar",
        "batam",
        "pekanbaru",
        "bogor",
        "malang",
        "denpasar",
        "tangerang",
        "bekasi",
        "depok",
        "yogyakarta",
        "surakarta",
        "padang",
        "balikpapan",
        "samarinda",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl FileConfig {
    /// Normalized city identifiers: trimmed, lowercased, empties dropped.
    pub fn normalized_cities(&self) -> Vec<String> {
        self.scrape
            .cities
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_twenty_cities() {
        let config = FileConfig::default();
        assert_eq!(config.scrape.cities.len(), 20);
        assert_eq!(config.scrape.cities[0], "jakarta");
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.tool_server.command, "npx");
    }

    #[test]
    fn normalized_cities_trim_and_lowercase() {
        let config = FileConfig {
            scrape: ScrapeConfig {
                cities: vec![" Jakarta ".to_string(), "BANDUNG".to_string(), "".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.normalized_cities(), vec!["jakarta", "bandung"]);
    }
}

//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables `HERALD_*` (double underscore nesting,
    ///    e.g. `HERALD_SLACK__BOT_TOKEN`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./herald.toml` or `./.herald.toml`
    /// 4. Global: `~/.config/aqi-herald/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Add global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        // Add project-level config files (check both names)
        for filename in &["herald.toml", ".herald.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        // Add explicit config path
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables win, so secrets never need to live on disk
        figment = figment.merge(Env::prefixed("HERALD_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aqi-herald").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults_has_city_list() {
        let config = ConfigLoader::load_defaults();
        assert!(!config.scrape.cities.is_empty());
        assert!(config.slack.channel_id.is_empty());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: FileConfig = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(
                r#"
                [slack]
                channel_id = "C0123"

                [scrape]
                cities = ["jakarta", "bandung"]
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.slack.channel_id, "C0123");
        assert_eq!(config.scrape.cities, vec!["jakarta", "bandung"]);
        // Untouched sections keep their defaults
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
    }

    #[test]
    fn env_overrides_toml() {
        // Unique prefix so parallel tests cannot interfere
        unsafe { std::env::set_var("HERALDTEST_SLACK__CHANNEL_ID", "C-env") };
        let config: FileConfig = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string("[slack]\nchannel_id = \"C-file\""))
            .merge(Env::prefixed("HERALDTEST_").split("__"))
            .extract()
            .unwrap();
        unsafe { std::env::remove_var("HERALDTEST_SLACK__CHANNEL_ID") };

        assert_eq!(config.slack.channel_id, "C-env");
    }

    #[test]
    fn global_config_path_names_the_app() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("aqi-herald"));
    }
}

//! Configuration module for vitrin
//!
//! Manages application configuration including the catalog API base URL
//! and paging tunables. Configuration is stored in the user's config
//! directory.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const fn default_page_size() -> u32 {
    12
}

const fn default_facet_page_size() -> u32 {
    10
}

const fn default_debounce_ms() -> u64 {
    350
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VitrinConfig {
    /// Base URL of the catalog API
    #[serde(default)]
    pub api_base_url: String,

    /// Products per listing page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Options per facet page in the filter panel
    #[serde(default = "default_facet_page_size")]
    pub facet_page_size: u32,

    /// Search settle delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for VitrinConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            page_size: default_page_size(),
            facet_page_size: default_facet_page_size(),
            debounce_ms: default_debounce_ms(),
            quiet: false,
        }
    }
}

impl VitrinConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        let vitrin_config_dir = config_dir.join("vitrin");
        Ok(vitrin_config_dir.join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// The search settle delay as a [`Duration`]
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Set a configuration value from a `key=value` pair
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or unparsable values.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api_base_url" => {
                self.api_base_url = value.trim_end_matches('/').to_string();
            }
            "page_size" => {
                self.page_size = parse_positive(key, value)?;
            }
            "facet_page_size" => {
                self.facet_page_size = parse_positive(key, value)?;
            }
            "debounce_ms" => {
                self.debounce_ms = value.parse::<u64>().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for {key}: '{value}'"))
                })?;
            }
            "quiet" => {
                self.quiet = value.parse::<bool>().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                    ))
                })?;
            }
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown configuration key: '{key}'. Available keys: api_base_url, page_size, facet_page_size, debounce_ms, quiet"
                )));
            }
        }
        Ok(())
    }

    /// Read a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "api_base_url" => Ok(self.api_base_url.clone()),
            "page_size" => Ok(self.page_size.to_string()),
            "facet_page_size" => Ok(self.facet_page_size.to_string()),
            "debounce_ms" => Ok(self.debounce_ms.to_string()),
            "quiet" => Ok(self.quiet.to_string()),
            _ => Err(ConfigError::Message(format!(
                "Unknown configuration key: '{key}'. Available keys: api_base_url, page_size, facet_page_size, debounce_ms, quiet"
            ))),
        }
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, ConfigError> {
    let parsed = value
        .parse::<u32>()
        .map_err(|_| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))?;
    if parsed == 0 {
        return Err(ConfigError::Message(format!("{key} must be at least 1")));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VitrinConfig::default();
        assert!(config.api_base_url.is_empty());
        assert_eq!(config.page_size, 12);
        assert_eq!(config.facet_page_size, 10);
        assert_eq!(config.debounce(), Duration::from_millis(350));
        assert!(!config.quiet);
    }

    #[test]
    fn test_set_value_trims_trailing_slash() {
        let mut config = VitrinConfig::default();
        config
            .set_value("api_base_url", "http://shop.example/")
            .unwrap();
        assert_eq!(config.api_base_url, "http://shop.example");
    }

    #[test]
    fn test_set_value_rejects_unknown_key() {
        let mut config = VitrinConfig::default();
        assert!(config.set_value("theme", "dark").is_err());
    }

    #[test]
    fn test_set_value_rejects_zero_page_size() {
        let mut config = VitrinConfig::default();
        assert!(config.set_value("page_size", "0").is_err());
        assert!(config.set_value("page_size", "24").is_ok());
        assert_eq!(config.page_size, 24);
    }

    #[test]
    fn test_get_value_round_trip() {
        let mut config = VitrinConfig::default();
        config.set_value("quiet", "true").unwrap();
        assert_eq!(config.get_value("quiet").unwrap(), "true");
        assert!(config.get_value("nonsense").is_err());
    }

    #[test]
    fn test_config_survives_toml_round_trip() {
        let config = VitrinConfig {
            api_base_url: "http://shop.example".to_string(),
            page_size: 24,
            facet_page_size: 15,
            debounce_ms: 200,
            quiet: true,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let restored: VitrinConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(restored.api_base_url, config.api_base_url);
        assert_eq!(restored.page_size, 24);
        assert_eq!(restored.debounce_ms, 200);
        assert!(restored.quiet);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let restored: VitrinConfig =
            toml::from_str(r#"api_base_url = "http://shop.example""#).unwrap();
        assert_eq!(restored.page_size, 12);
        assert_eq!(restored.facet_page_size, 10);
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable consulted before the stored API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Default number of history entries reported by `devkit config`
pub const DEFAULT_MAX_HISTORY: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("Unrecognized toggle '{0}', expected on or off")]
    InvalidToggle(String),
}

/// Persisted user settings, stored as `config.json` in the store root
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_time_travel")]
    pub time_travel_enabled: bool,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_time_travel() -> bool {
    true
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            time_travel_enabled: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl Config {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history == 0 {
            return Err(ConfigError::InvalidValue(
                "max_history must be greater than 0".to_string(),
            ));
        }

        if let Some(key) = &self.api_key {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "api_key must not be blank".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Get API key from environment variable or config
    pub fn get_api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Resolve the API key given the value of the environment variable.
    /// A non-empty environment value always wins over the stored key.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        if let Some(key) = env_value {
            if !key.is_empty() {
                return Some(key);
            }
        }

        self.api_key.clone().filter(|key| !key.is_empty())
    }
}

/// Parse an `on`/`off` style toggle from the command line
pub fn parse_toggle(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" | "enabled" => Ok(true),
        "off" | "false" | "no" | "0" | "disabled" => Ok(false),
        other => Err(ConfigError::InvalidToggle(other.to_string())),
    }
}

/// Mask an API key for display, keeping a short prefix
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.time_travel_enabled);
        assert_eq!(config.max_history, 100);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_history() {
        let config = Config {
            max_history: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_blank_api_key() {
        let config = Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_key_takes_precedence() {
        let config = Config {
            api_key: Some("config-key-456".to_string()),
            ..Config::default()
        };

        assert_eq!(
            config.resolve_api_key(Some("env-key-123".to_string())),
            Some("env-key-123".to_string())
        );
    }

    #[test]
    fn test_api_key_from_config() {
        let config = Config {
            api_key: Some("config-key-456".to_string()),
            ..Config::default()
        };

        assert_eq!(
            config.resolve_api_key(None),
            Some("config-key-456".to_string())
        );
    }

    #[test]
    fn test_empty_env_falls_back_to_config() {
        let config = Config {
            api_key: Some("config-key-456".to_string()),
            ..Config::default()
        };

        assert_eq!(
            config.resolve_api_key(Some(String::new())),
            Some("config-key-456".to_string())
        );
    }

    #[test]
    fn test_no_key_anywhere() {
        let config = Config::default();
        assert_eq!(config.resolve_api_key(None), None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert!(config.time_travel_enabled);
        assert_eq!(config.max_history, 100);
    }

    #[test]
    fn test_parse_toggle() {
        assert!(parse_toggle("on").unwrap());
        assert!(parse_toggle("TRUE").unwrap());
        assert!(!parse_toggle("off").unwrap());
        assert!(parse_toggle("maybe").is_err());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-ant-1234567890"), "sk-ant-1...");
        assert_eq!(mask_key("abc"), "abc...");
    }
}

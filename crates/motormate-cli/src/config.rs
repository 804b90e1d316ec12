//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for motormate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the chat server
    pub endpoint: Option<String>,
    /// Whether to use TUI mode by default
    pub tui: Option<bool>,
    /// Color theme ("dark" or "light")
    pub theme: Option<String>,
    /// Replacement start-up greeting
    pub greeting: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("motormate")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("MOTORMATE_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Parse config file contents
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from file, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            endpoint: Some(motormate_api::DEFAULT_ENDPOINT.to_string()),
            tui: Some(true),
            theme: Some("dark".to_string()),
            greeting: None,
        };

        default_config.save()?;
        Ok(path)
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# motormate configuration file
# Place at ~/.config/motormate/config.toml (Linux), ~/Library/Application Support/motormate/config.toml (macOS)
# or %APPDATA%\motormate\config.toml (Windows). MOTORMATE_CONFIG_PATH overrides the location.

# Chat server base URL (POST <endpoint>/chat)
endpoint = "http://127.0.0.1:5000"

# Full-screen UI; set to false for plain stdin/stdout
tui = true

# Color theme (dark, light)
theme = "dark"

# Start-up greeting (optional)
# greeting = "Hi! Ask me anything about cars."
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config = Config::parse(example_config()).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://127.0.0.1:5000"));
        assert_eq!(config.tui, Some(true));
        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert!(config.greeting.is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let config = Config::parse("tui = false").unwrap();
        assert_eq!(config.tui, Some(false));
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config {
            endpoint: Some("http://10.0.0.2:5000".into()),
            tui: None,
            theme: Some("light".into()),
            greeting: Some("Vroom.".into()),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }
}

//! Configuration file handling

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Runner settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Variables seeded into every run before the script's own
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

/// Runner settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RunnerConfig {
    /// Keep executing rows after an assertion failure or error
    #[serde(default)]
    pub continue_on_failure: bool,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/selenese-runner/`
//! - macOS: `~/Library/Application Support/selenese-runner/`
//! - Windows: `%APPDATA%\selenese-runner\`

use std::path::PathBuf;

/// Application name used for platform directories
const APP_NAME: &str = "selenese-runner";

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "SELENESE_CONFIG";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `$SELENESE_CONFIG` wins over the platform default.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_ends_with_toml() {
        if std::env::var(CONFIG_ENV).is_err() {
            if let Some(path) = config_path() {
                assert!(path.ends_with("config.toml"));
            }
        }
    }
}

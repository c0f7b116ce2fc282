//! Configuration settings for mail2org.
//!
//! Settings are loaded from `~/.mail2org/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::Mail2OrgError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Org entry layout templates.
    pub layout: LayoutConfig,
    /// Body post-processing settings.
    pub body: BodyConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Separator between the date and time fragments of a token.
    #[serde(default = "default_time_separator")]
    pub time_separator: char,
    /// Render active (`<..>`) rather than inactive (`[..]`) timestamps.
    #[serde(default = "default_true")]
    pub active_timestamps: bool,
}

/// Org entry layout templates.
///
/// Placeholders: `{subject}`, `{timestamp}`, `{content}` in `entry`;
/// `{timestamp}` in `timestamp`; `{from}`, `{to}`, `{date}`, `{subject}`,
/// `{body}` in `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// The whole org entry.
    #[serde(default = "default_entry_layout")]
    pub entry: String,
    /// The scheduling line, rendered only when the token resolved.
    #[serde(default = "default_timestamp_layout")]
    pub timestamp: String,
    /// The entry body below the heading.
    #[serde(default = "default_content_layout")]
    pub content: String,
}

/// Body post-processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Maximum number of characters of the body kept in the entry.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Drop everything from the `-- ` signature delimiter on.
    #[serde(default = "default_true")]
    pub strip_signature: bool,
}

// Default value functions for serde
const fn default_time_separator() -> char {
    '#'
}

const fn default_true() -> bool {
    true
}

const fn default_max_chars() -> usize {
    1000
}

fn default_entry_layout() -> String {
    "* {subject}{timestamp}\n\n{content}\n".to_string()
}

fn default_timestamp_layout() -> String {
    "\nSCHEDULED: {timestamp}".to_string()
}

fn default_content_layout() -> String {
    "From: {from}\nTo: {to}\nDate: {date}\nSubject: {subject}\n\n{body}".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            time_separator: default_time_separator(),
            active_timestamps: default_true(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            entry: default_entry_layout(),
            timestamp: default_timestamp_layout(),
            content: default_content_layout(),
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            strip_signature: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, Mail2OrgError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, Mail2OrgError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Mail2OrgError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            Mail2OrgError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), Mail2OrgError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| Mail2OrgError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            Mail2OrgError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

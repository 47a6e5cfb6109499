//!
//! Configuration structures, discovery and loading for clarion-fence.
//!
//! Configuration is read from `.clarion-fence.toml` (or `clarion-fence.toml`) in the
//! working directory or one of its ancestors, falling back to the user config directory.
//! Detection weights and the match threshold are fixed and cannot be configured.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::fence::DEFAULT_LANGUAGE;
use crate::preference::FilePreferenceStore;
use crate::session::SessionSettings;

/// Project config file names, in precedence order
pub const CONFIG_FILES: &[&str] = &[".clarion-fence.toml", "clarion-fence.toml"];

/// Maximum number of ancestor directories searched for a config file
const MAX_DISCOVERY_DEPTH: usize = 100;

const KNOWN_GLOBAL_KEYS: &[&str] = &["language", "enabled", "preference-file", "preference_file"];

/// Represents the complete configuration loaded from a config file
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Global configuration options
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Language tag written after the opening fence
    pub language: String,

    /// Intercept pastes at all
    pub enabled: bool,

    /// Where the wrap preference is stored; defaults to the user config directory
    #[serde(alias = "preference_file", skip_serializing_if = "Option::is_none")]
    pub preference_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            enabled: true,
            preference_file: None,
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// A value parsed but is not usable
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

impl Config {
    /// Parse a config document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        warn_unknown_keys(&table);

        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or discover a config file.
    ///
    /// Returns defaults when no file is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let cwd = std::env::current_dir().map_err(|e| ConfigError::IoError {
                    source: e,
                    path: ".".to_string(),
                })?;
                Self::discover(&cwd).or_else(Self::user_configuration_path)
            }
        };

        let Some(path) = path else {
            log::debug!("[clarion-fence] No configuration file found, using defaults");
            return Ok(Self::default());
        };

        log::debug!("[clarion-fence] Loading config file: {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Search `start` and its ancestors for a project config file, stopping at a `.git`
    /// directory.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = start;

        for _ in 0..MAX_DISCOVERY_DEPTH {
            for name in CONFIG_FILES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    log::debug!("[clarion-fence] Found config file: {}", candidate.display());
                    return Some(candidate);
                }
            }

            if current.join(".git").exists() {
                log::debug!("[clarion-fence] Stopping at .git directory");
                return None;
            }

            current = current.parent()?;
        }

        log::debug!("[clarion-fence] Maximum traversal depth reached");
        None
    }

    /// `config.toml` in the user config directory, if present
    fn user_configuration_path() -> Option<PathBuf> {
        use etcetera::{BaseStrategy, choose_base_strategy};

        let strategy = match choose_base_strategy() {
            Ok(strategy) => strategy,
            Err(e) => {
                log::debug!("[clarion-fence] Failed to determine user config directory: {e}");
                return None;
            }
        };
        let path = strategy.config_dir().join("clarion-fence").join("config.toml");
        path.is_file().then_some(path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let language = &self.global.language;
        if language.is_empty() || language.contains(|c: char| c.is_whitespace() || c == '`') {
            return Err(ConfigError::InvalidValue {
                key: "language".to_string(),
                message: format!("'{language}' must be a single word without backticks"),
            });
        }
        Ok(())
    }

    /// Settings for paste sessions built from this config
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            language: self.global.language.clone(),
            enabled: self.global.enabled,
        }
    }

    /// The durable preference store this config points at
    pub fn preference_store(&self) -> Option<FilePreferenceStore> {
        match &self.global.preference_file {
            Some(path) => Some(FilePreferenceStore::new(path)),
            None => FilePreferenceStore::in_user_config_dir(),
        }
    }
}

fn warn_unknown_keys(table: &toml::Table) {
    for (section, value) in table {
        if section != "global" {
            log::warn!("Unknown config section [{section}] ignored");
            continue;
        }
        if let Some(global) = value.as_table() {
            for key in global.keys() {
                if !KNOWN_GLOBAL_KEYS.contains(&key.as_str()) {
                    log::warn!("Unknown config key 'global.{key}' ignored");
                }
            }
        }
    }
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::FileExists {
            path: path.display().to_string(),
        });
    }

    let default_config = r#"# clarion-fence configuration file

[global]
# Language tag written after the opening fence
language = "clarion"

# Set to false to leave every paste alone
enabled = true

# Where the remembered wrap preference is stored (defaults to the user config directory)
# preference-file = "preferences.toml"
"#;

    fs::write(path, default_config).map_err(|err| ConfigError::IoError {
        source: err,
        path: path.display().to_string(),
    })
}

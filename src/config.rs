//! Pager selection settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable consulted for the user's preferred pager.
pub const DEFAULT_ENV_VAR: &str = "PAGER";

/// Programs tried, in order, after the preferred pager.
pub const DEFAULT_FALLBACKS: [&str; 2] = ["less", "more"];

/// Errors that can occur when loading a pager configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Which pagers to look for.
///
/// ```toml
/// env_var = "MYTOOL_PAGER"
/// fallbacks = ["less", "more"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Name of the environment variable holding the preferred pager
    /// command line.
    pub env_var: String,
    /// Program names tried after the preference, without arguments.
    pub fallbacks: Vec<String>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
            fallbacks: DEFAULT_FALLBACKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PagerConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PagerConfig =
            toml::from_str(content).map_err(|source| ConfigError::ParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks that `env_var` is usable as an environment variable name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.env_var.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "env_var must not be empty".to_string(),
            });
        }

        if self.env_var.contains('=') || self.env_var.contains('\0') {
            return Err(ConfigError::ValidationError {
                message: format!("env_var '{}' is not a valid variable name", self.env_var),
            });
        }

        Ok(())
    }
}

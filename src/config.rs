//! Plugin configuration, read from TOML.
//!
//! ```toml
//! [keyboard]
//! backend = "native"   # or "log"
//! key_delay_ms = 0
//! ```
//!
//! Every key is optional; a missing file section means defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which `ActionExecutor` the plugin drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The operating system's injection API.
    #[default]
    Native,
    /// Log every action instead of injecting it.
    Log,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    pub backend: Backend,
    /// Pause after every injected key event or text chunk, in milliseconds.
    pub key_delay_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    keyboard: PluginConfig,
}

impl PluginConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        Ok(file.keyboard)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("config: loaded {} -> {config:?}", path.display());
        Ok(config)
    }
}

//! Settings for the `blockpage` tools, stored as TOML:
//!
//! ```toml
//! documents_path = "~/sites/pages"
//! pretty_export = true
//! ```
//!
//! `~` and `$VARS` in `documents_path` are expanded when the file is read.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot expand documents_path '{value}' in {config_path}: {reason}")]
    ExpandError {
        config_path: PathBuf,
        value: String,
        reason: String,
    },

    #[error("Failed to write config file at {config_path}: {source}")]
    ConfigWriteError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode config: {0}")]
    ConfigEncodeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root directory page documents are read from and written to
    pub documents_path: PathBuf,
    /// Indent saved page documents
    pub pretty_export: bool,
}

/// The file as written on disk, before path expansion
#[derive(Serialize, Deserialize)]
struct ConfigFile {
    documents_path: String,
    #[serde(default = "default_pretty_export")]
    pretty_export: bool,
}

fn default_pretty_export() -> bool {
    true
}

impl Config {
    pub fn new(documents_path: impl Into<PathBuf>) -> Self {
        Self {
            documents_path: documents_path.into(),
            pretty_export: default_pretty_export(),
        }
    }

    /// `~/.config/blockpage/config.toml`
    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/blockpage");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Read a config file. A missing file is `Ok(None)`, not an error.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        let file: ConfigFile =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        let documents_path = shellexpand::full(&file.documents_path)
            .map_err(|e| ConfigError::ExpandError {
                config_path: config_path.to_path_buf(),
                value: file.documents_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Some(Self {
            documents_path: PathBuf::from(documents_path.as_ref()),
            pretty_export: file.pretty_export,
        }))
    }

    /// Write the config as TOML, creating the parent directory if needed
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), ConfigError> {
        let config_path = config_path.as_ref();
        let write_error = |source| ConfigError::ConfigWriteError {
            config_path: config_path.to_path_buf(),
            source,
        };

        let file = ConfigFile {
            documents_path: self.documents_path.to_string_lossy().into_owned(),
            pretty_export: self.pretty_export,
        };
        let content = toml::to_string_pretty(&file)?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(config_path, content).map_err(write_error)
    }
}

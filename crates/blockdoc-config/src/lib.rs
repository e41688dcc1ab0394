use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "~/.config/blockdoc";
const CONFIG_FILE: &str = "config.toml";

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
}

/// Host settings shared by blockdoc front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted markup documents
    pub documents_path: PathBuf,
}

impl Config {
    pub fn new(documents_path: impl Into<PathBuf>) -> Self {
        Self {
            documents_path: documents_path.into(),
        }
    }

    /// Load from `config_path`. A missing file is `Ok(None)`, not an error.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        Self::parse(&content, config_path).map(Some)
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    fn parse(content: &str, config_path: &Path) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        Ok(config.expanded())
    }

    /// `~` and `$VARS` in `documents_path` expanded; left as-is when expansion fails.
    fn expanded(mut self) -> Self {
        if let Some(path) = expand_path(&self.documents_path) {
            self.documents_path = path;
        }
        self
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_DIR).as_ref()).join(CONFIG_FILE)
    }
}

fn expand_path(path: &Path) -> Option<PathBuf> {
    shellexpand::full(&path.to_string_lossy())
        .ok()
        .map(|expanded| PathBuf::from(expanded.as_ref()))
}

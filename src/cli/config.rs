//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory documents and notes live in
    pub documents_dir: Option<PathBuf>,

    /// Directory the catalog index is persisted in
    pub index_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/shelf/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shelf")
            .join("config.toml")
    }

    /// Resolve the documents directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--documents-dir` argument
    /// 2. Config file `documents_dir` setting
    /// 3. `<data dir>/shelf/documents`
    pub fn documents_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.documents_dir.clone())
            .unwrap_or_else(|| Self::data_dir().join("documents"))
    }

    /// Resolve the index directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--index-dir` argument
    /// 2. Config file `index_dir` setting
    /// 3. `<data dir>/shelf/index`
    pub fn index_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.index_dir.clone())
            .unwrap_or_else(|| Self::data_dir().join("index"))
    }

    fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shelf")
    }
}

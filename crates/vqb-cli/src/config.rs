//! Config file loading
//!
//! The config file is TOML with optional `[analyzer]`, `[predictor]` and
//! `[logging]` tables. Missing tables and keys fall back to defaults.

use crate::logging::LoggingSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vqb_analyzer::AnalyzerConfig;
use vqb_predictor::PredictorConfig;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VqbConfig {
    pub analyzer: AnalyzerConfig,
    pub predictor: PredictorConfig,
    pub logging: LoggingSettings,
}

impl VqbConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads an explicitly requested file, otherwise the default file when
    /// one exists, otherwise the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Ok(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("vqb"))
}

pub fn default_config_path() -> Result<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE_NAME))
}

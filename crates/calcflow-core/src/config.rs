//! Configuration management for CalcFlow

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::evaluator::DEFAULT_MAX_DEPTH;
use crate::normalize::{ExponentPolicy, DEFAULT_USD_INR_RATE};

/// Natural-language and repair pass settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizerOptions {
    /// INR per USD used by the "<n> usd in inr" phrase
    pub usd_inr_rate: f64,
    /// Whether smart fix keeps `**` or collapses it to `*`
    pub exponent: ExponentPolicy,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            usd_inr_rate: DEFAULT_USD_INR_RATE,
            exponent: ExponentPolicy::Preserve,
        }
    }
}

/// Arithmetic evaluator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluatorOptions {
    /// Maximum parenthesis / unary nesting
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Calculation history settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryOptions {
    /// How many records `history` returns by default
    pub recent_limit: usize,
    /// Override for the history file location
    pub file: Option<String>,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            recent_limit: 20,
            file: None,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Run the unit/currency and natural-language passes by default
    pub ai_mode: bool,
    /// User id recorded with history entries when none is given
    pub default_user: String,
    pub normalizer: NormalizerOptions,
    pub evaluator: EvaluatorOptions,
    pub history: HistoryOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_mode: false,
            default_user: "local".to_string(),
            normalizer: NormalizerOptions::default(),
            evaluator: EvaluatorOptions::default(),
            history: HistoryOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "era-laboratories", "calcflow")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory, creating it if needed
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "era-laboratories", "calcflow")
            .context("Could not determine data directory")?;
        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    /// Get full path to the history file
    pub fn history_path(&self) -> Result<PathBuf> {
        match &self.history.file {
            Some(file) => Ok(PathBuf::from(file)),
            None => Ok(Self::data_dir()?.join("history.json")),
        }
    }
}

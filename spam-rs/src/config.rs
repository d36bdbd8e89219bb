use crate::error::{FilterError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of most frequent tokens kept per class
pub const DEFAULT_MAX_TOKENS: usize = 2500;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Top-K tokens taken from each class when building the vocabulary
    pub max_tokens: usize,
    /// Where the Bayes model is saved to and loaded from
    pub model_location: Option<PathBuf>,
    /// Store exact training counts in the model so extension is lossless
    pub preserve_counts: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            model_location: None,
            preserve_counts: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // pretty, compact or json
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Config(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| FilterError::Config(e.to_string()))?;

        if config.filter.max_tokens == 0 {
            return Err(FilterError::Config(
                "filter.max_tokens must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

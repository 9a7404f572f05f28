use crate::error::{Result, SafetyError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Score free text against the keyword lexicons when no tag is present
    #[serde(default = "default_lexical_fallback")]
    pub lexical_fallback: bool,
    /// Seed for default factor synthesis; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: u8,
    #[serde(default = "default_summary_capacity")]
    pub summary_capacity: usize,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_lexical_fallback() -> bool {
    true
}

fn default_history_capacity() -> usize {
    5
}

fn default_trend_threshold() -> u8 {
    3
}

fn default_summary_capacity() -> usize {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexical_fallback: default_lexical_fallback(),
            seed: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
            trend_threshold: default_trend_threshold(),
            summary_capacity: default_summary_capacity(),
            path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SystemConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: SystemConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.history.capacity == 0 {
            return Err(SafetyError::Config("history.capacity must be at least 1".to_string()));
        }
        if self.history.summary_capacity == 0 {
            return Err(SafetyError::Config(
                "history.summary_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

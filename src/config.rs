//! Configuration management for the candidate screener

use crate::error::{Result, ScreenerError};
use crate::scoring::decision::DecisionWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub interview: InterviewConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
    pub enhancement: EnhancementConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Number of main questions, not counting opening, closing and follow-ups.
    pub question_count: usize,
    /// Fixed seed for question and follow-up selection. Random when absent.
    pub seed: Option<u64>,
    pub include_opening_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: DecisionWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementConfig {
    pub enabled: bool,
    /// Environment variable that must hold an API key before enhancement runs.
    pub api_key_env: String,
    /// External text-generation program: prompt on stdin, reply on stdout.
    pub command: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interview: InterviewConfig {
                question_count: 8,
                seed: None,
                include_opening_closing: true,
            },
            scoring: ScoringConfig {
                weights: DecisionWeights::default(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            enhancement: EnhancementConfig {
                enabled: false,
                api_key_env: "SCREENER_API_KEY".to_string(),
                command: Vec::new(),
                timeout_secs: 30,
            },
        }
    }
}

impl Config {
    /// Load from the user config directory, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit config file. Nothing is written.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.weights.validate()?;
        if self.enhancement.enabled && self.enhancement.command.is_empty() {
            return Err(ScreenerError::Configuration(
                "enhancement.command must name a program when enhancement is enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("candidate-screener")
            .join("config.toml")
    }

    /// API key for the enhancement layer, if configured in the environment.
    pub fn enhancement_api_key(&self) -> Option<String> {
        std::env::var(&self.enhancement.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.interview.seed = Some(7);
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.scoring.weights.depth = 0.9;
        config.save_to(&path).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ScreenerError::Configuration(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "interview = [").unwrap();
        assert!(matches!(
            Config::load_from(&path).unwrap_err(),
            ScreenerError::Configuration(_)
        ));
    }

    #[test]
    fn test_enabled_enhancement_needs_command() {
        let mut config = Config::default();
        config.enhancement.enabled = true;
        assert!(config.validate().is_err());
        config.enhancement.command = vec!["llm-cli".to_string()];
        assert!(config.validate().is_ok());
    }
}

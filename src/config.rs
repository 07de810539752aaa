//! Configuration management for the resume ranker

use crate::error::{RankerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the API key for the external scoring
/// services. Never read from or written to the config file.
pub const API_KEY_ENV: &str = "RESUME_RANKER_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub services: ServiceConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// External embedding and judgment service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub api_version: String,
    pub embedding_deployment: String,
    pub judgment_deployment: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the semantic signal in lexical+semantic fusion (alpha).
    pub semantic_weight: f32,
    /// Weight of the keyword overlap in keyword+judgment fusion.
    pub keyword_weight: f32,
    /// Vocabulary ceiling for the TF-IDF fit.
    pub max_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_version: "2024-12-01-preview".to_string(),
            embedding_deployment: "text-embedding-3-small".to_string(),
            judgment_deployment: "gpt-4o-mini".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            semantic_weight: 0.7,
            keyword_weight: 0.3,
            max_features: crate::ranking::lexical::DEFAULT_MAX_FEATURES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServiceConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                RankerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            RankerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    /// API key from the environment; the config file never stores it.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(API_KEY_ENV).map_err(|_| {
            RankerError::Configuration(format!("{} is not set", API_KEY_ENV))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fusion_weights() {
        let config = Config::default();
        assert_eq!(config.scoring.semantic_weight, 0.7);
        assert_eq!(config.scoring.keyword_weight, 0.3);
        assert_eq!(config.scoring.max_features, 20_000);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.semantic_weight = 0.55;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.semantic_weight, 0.55);
        assert_eq!(loaded.services.api_version, "2024-12-01-preview");
    }

    #[test]
    fn test_load_creates_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.scoring.semantic_weight, 0.7);
        assert!(path.exists());
    }
}

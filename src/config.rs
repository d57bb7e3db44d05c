//! Configuration management for the resume fit analyzer

use crate::error::{Result, ResumeFitError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub scoring: ScoringConfig,
    pub keywords: KeywordConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f32,
    pub semantic_weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Keywords extracted per document
    pub top_n: usize,
    /// Missing keywords listed in feedback before truncating
    pub top_n_missing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-fit")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "minishlab/M2V_base_output".to_string(),
            },
            scoring: ScoringConfig {
                keyword_weight: 0.4,
                semantic_weight: 0.6,
            },
            keywords: KeywordConfig {
                top_n: 10,
                top_n_missing: 5,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeFitError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeFitError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-fit")
            .join("config.toml")
    }

    /// Resolve the embedding model to a local folder if one exists under the
    /// models dir, otherwise pass the identifier through for the loader to
    /// resolve.
    pub fn embedding_model_path(&self) -> PathBuf {
        let local_path = self.models.models_dir.join(&self.models.embedding_model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&self.models.embedding_model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.scoring.keyword_weight, 0.4);
        assert_eq!(config.scoring.semantic_weight, 0.6);
        assert_eq!(config.keywords.top_n, 10);
        assert_eq!(config.keywords.top_n_missing, 5);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.scoring.keyword_weight, config.scoring.keyword_weight);
        assert_eq!(parsed.scoring.semantic_weight, config.scoring.semantic_weight);
        assert_eq!(parsed.keywords.top_n, config.keywords.top_n);
        assert_eq!(parsed.models.embedding_model, config.models.embedding_model);
    }
}

//! Configuration management for the resume scorer

use crate::error::{Result, ResumeScorerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
}

/// Weights for the composite match score. Fixed across releases so scores
/// stay comparable between runs; they must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: f32,
    pub text_weight: f32,
    pub skill_weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible chat completions endpoint.
    pub api_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub include_recommendations: bool,
    pub color_output: bool,
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            llm: LlmConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.40,
            text_weight: 0.25,
            skill_weight: 0.35,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_secs: 30,
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            include_recommendations: true,
            color_output: true,
            max_suggestions: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.warn_on_bad_weights();
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
            .map_err(|e| ResumeScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }

    fn warn_on_bad_weights(&self) {
        let sum = self.scoring.keyword_weight + self.scoring.text_weight + self.scoring.skill_weight;
        if (sum - 1.0).abs() > 0.001 {
            log::warn!(
                "Scoring weights sum to {:.3} instead of 1.0; match scores may drift out of the 0-100 range",
                sum
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = Config::default();
        let sum = config.scoring.keyword_weight + config.scoring.text_weight + config.scoring.skill_weight;
        assert!((sum - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(parsed.llm.timeout_secs, 30);
        assert_eq!(parsed.output.format, OutputFormat::Console);
        assert!((parsed.scoring.keyword_weight - 0.40).abs() < f32::EPSILON);
    }
}

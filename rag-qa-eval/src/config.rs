//! Configuration management for the QA evaluator
//!
//! Loads scoring and output settings from TOML files. Every field has a
//! default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Multi-hop reasoning score settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Minimum F1 (exclusive) for a predicted step to cover an expected step
    #[serde(default = "default_step_threshold")]
    pub reasoning_step_threshold: f64,
    #[serde(default = "default_answer_weight")]
    pub answer_weight: f64,
    #[serde(default = "default_reasoning_weight")]
    pub reasoning_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            reasoning_step_threshold: default_step_threshold(),
            answer_weight: default_answer_weight(),
            reasoning_weight: default_reasoning_weight(),
        }
    }
}

/// Evaluation execution settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Score questions on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Write per-question results alongside the aggregate
    #[serde(default = "default_true")]
    pub include_details: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            include_details: true,
        }
    }
}

/// Slack for weight sums such as 0.7 + 0.3
const WEIGHT_TOLERANCE: f64 = 1e-9;

// Default value functions
fn default_true() -> bool { true }
fn default_step_threshold() -> f64 { 0.5 }
fn default_answer_weight() -> f64 { 0.7 }
fn default_reasoning_weight() -> f64 { 0.3 }

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default config location or return defaults
    pub fn load_or_default() -> Self {
        let config_paths = ["config/eval.toml", "rag-qa-eval/config/eval.toml"];

        for path in &config_paths {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path);
                    return config;
                }
                Err(ConfigError::Io(_)) => {}
                Err(e) => tracing::warn!("Ignoring {}: {}", path, e),
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject weights and thresholds outside [0, 1], and answer and
    /// reasoning weights that sum to more than 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("scoring.reasoning_step_threshold", self.scoring.reasoning_step_threshold),
            ("scoring.answer_weight", self.scoring.answer_weight),
            ("scoring.reasoning_weight", self.scoring.reasoning_weight),
        ];

        for (name, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let combined = self.scoring.answer_weight + self.scoring.reasoning_weight;
        if combined > 1.0 + WEIGHT_TOLERANCE {
            return Err(ConfigError::Invalid(format!(
                "scoring.answer_weight + scoring.reasoning_weight must not exceed 1, got {}",
                combined
            )));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring.reasoning_step_threshold, 0.5);
        assert_eq!(config.scoring.answer_weight, 0.7);
        assert_eq!(config.scoring.reasoning_weight, 0.3);
        assert!(!config.evaluation.parallel);
        assert!(config.output.include_details);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[scoring]
answer_weight = 0.6
reasoning_weight = 0.4

[evaluation]
parallel = true

[output]
pretty = false
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.scoring.answer_weight, 0.6);
        assert_eq!(config.scoring.reasoning_weight, 0.4);
        assert_eq!(config.scoring.reasoning_step_threshold, 0.5);
        assert!(config.evaluation.parallel);
        assert!(!config.output.pretty);
        assert!(config.output.include_details);
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let err = Config::from_toml("[scoring]\nanswer_weight = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_combined_weights_over_one_rejected() {
        let err = Config::from_toml("[scoring]\nanswer_weight = 1.0\nreasoning_weight = 1.0\n")
            .unwrap_err();
        match err {
            ConfigError::Invalid(msg) => {
                assert!(msg.contains("scoring.answer_weight"));
                assert!(msg.contains("scoring.reasoning_weight"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_combined_weights_of_exactly_one_accepted() {
        let config = Config::from_toml("[scoring]\nanswer_weight = 0.6\nreasoning_weight = 0.4\n");
        assert!(config.is_ok());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eval.toml");

        let mut config = Config::default();
        config.evaluation.parallel = true;
        config.save_toml(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}

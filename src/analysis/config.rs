//! Analysis and selection configuration.
//!
//! All tuning knobs for one analysis run, with validated defaults and an
//! optional TOML file format for the demo binary and embedding callers.

use crate::prune::SelectionPolicy;
use crate::tracking::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one analysis run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of frame transitions processed per batch. Windows overlap by
    /// one frame so every adjacent pair is scored exactly once.
    pub batch_size: usize,
    /// Minimum IoU for the tracker to match a cluster to a known region.
    pub iou_threshold: f64,
    /// Consecutive matches before a region counts as persistent.
    pub persistence_threshold: u32,
    /// Geometric weight decay per elapsed transition.
    pub decay_factor: f64,
    /// Percentile of positive scores used as the normalization reference
    /// in threshold selection.
    pub normalization_percentile: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            batch_size: 16,
            iou_threshold: 0.9,
            persistence_threshold: 5,
            decay_factor: 0.95,
            normalization_percentile: 0.9,
        }
    }
}

impl AnalysisConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) || self.iou_threshold == 0.0 {
            return Err(ConfigError::InvalidIouThreshold);
        }
        if self.persistence_threshold == 0 {
            return Err(ConfigError::InvalidPersistenceThreshold);
        }
        if !(0.0..1.0).contains(&self.decay_factor) || self.decay_factor == 0.0 {
            return Err(ConfigError::InvalidDecayFactor);
        }
        if !(0.0..=1.0).contains(&self.normalization_percentile)
            || self.normalization_percentile == 0.0
        {
            return Err(ConfigError::InvalidPercentile);
        }
        Ok(())
    }

    /// Returns the tracker configuration slice of this config.
    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig {
            iou_threshold: self.iou_threshold,
            persistence_threshold: self.persistence_threshold,
            decay_factor: self.decay_factor,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
    #[error("IoU threshold must be in (0, 1]")]
    InvalidIouThreshold,
    #[error("persistence threshold must be at least 1")]
    InvalidPersistenceThreshold,
    #[error("decay factor must be in (0, 1)")]
    InvalidDecayFactor,
    #[error("normalization percentile must be in (0, 1]")]
    InvalidPercentile,
    #[error("selection threshold must be in [0, 1]")]
    InvalidThreshold,
    #[error("selection count must be at least 1")]
    InvalidCount,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Which selection policy a run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Keep a fixed number of frames.
    Count,
    /// Keep frames whose transitions pass a quality threshold.
    Threshold,
    /// Threshold selection capped at a maximum count.
    ThresholdWithCap,
}

/// Selection configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Active selection policy.
    pub mode: SelectionMode,
    /// Survivor count for `Count` mode.
    pub target_count: usize,
    /// Normalized score threshold for the threshold modes.
    pub threshold: f64,
    /// Survivor cap for `ThresholdWithCap` mode.
    pub max_count: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Count,
            target_count: 12,
            threshold: 0.4,
            max_count: 24,
        }
    }
}

impl SelectionConfig {
    /// Validates the selection parameters against the active mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            SelectionMode::Count if self.target_count == 0 => Err(ConfigError::InvalidCount),
            SelectionMode::ThresholdWithCap if self.max_count == 0 => {
                Err(ConfigError::InvalidCount)
            }
            SelectionMode::Threshold | SelectionMode::ThresholdWithCap
                if !(0.0..=1.0).contains(&self.threshold) =>
            {
                Err(ConfigError::InvalidThreshold)
            }
            _ => Ok(()),
        }
    }

    /// Builds the selection policy described by this configuration.
    pub fn policy(&self) -> SelectionPolicy {
        match self.mode {
            SelectionMode::Count => SelectionPolicy::Count {
                target: self.target_count,
            },
            SelectionMode::Threshold => SelectionPolicy::Threshold {
                threshold: self.threshold,
            },
            SelectionMode::ThresholdWithCap => SelectionPolicy::ThresholdWithCap {
                threshold: self.threshold,
                max_count: self.max_count,
            },
        }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Analysis parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Selection parameters.
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.analysis.validate()?;
        config.selection.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
        assert!(SelectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_invalid() {
        let config = AnalysisConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBatchSize)
        ));
    }

    #[test]
    fn test_decay_factor_of_one_invalid() {
        let config = AnalysisConfig {
            decay_factor: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDecayFactor)
        ));
    }

    #[test]
    fn test_out_of_range_threshold_invalid() {
        let config = SelectionConfig {
            mode: SelectionMode::Threshold,
            threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold)
        ));
    }

    #[test]
    fn test_file_config_parses_toml() {
        let toml = r#"
            [analysis]
            batch_size = 8
            iou_threshold = 0.9
            persistence_threshold = 5
            decay_factor = 0.95
            normalization_percentile = 0.9

            [selection]
            mode = "threshold_with_cap"
            target_count = 12
            threshold = 0.5
            max_count = 20
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.analysis.batch_size, 8);
        assert_eq!(config.selection.mode, SelectionMode::ThresholdWithCap);
        assert_eq!(config.selection.max_count, 20);
    }
}

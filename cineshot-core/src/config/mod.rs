//! Configuration structures for the cineshot-core library.
//!
//! `CoreConfig` bundles everything a full analysis run needs: the input and
//! model paths, detector tuning, classifier thresholds, and the statistics
//! configuration. Defaults for the individual sections live next to their
//! types (`DetectionConfig`, `ClassifierConfig`, `StatsConfig`).

mod builder;

use std::path::PathBuf;

use crate::classification::ClassifierConfig;
use crate::detection::DetectionConfig;
use crate::error::{CoreError, CoreResult};
use crate::statistics::StatsConfig;

pub use builder::CoreConfigBuilder;

/// Main configuration structure for an analysis run.
///
/// Typically created by the consumer of the library (e.g., cineshot-cli)
/// through `CoreConfigBuilder` and passed to
/// [`run_analysis`](crate::processing::run_analysis).
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Input file to analyze (image or video)
    pub input_path: PathBuf,

    /// Cascade model JSON file
    pub model_path: PathBuf,

    /// Directory where reports and CSV series are written
    pub output_dir: PathBuf,

    /// Multiscale detector tuning
    pub detection: DetectionConfig,

    /// Shot classifier thresholds
    pub classifier: ClassifierConfig,

    /// Film statistics configuration
    pub stats: StatsConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("."),
            model_path: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            detection: DetectionConfig::default(),
            classifier: ClassifierConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Checks paths and parameter ranges before a run.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_path.is_file() {
            return Err(CoreError::InputNotFound(self.input_path.clone()));
        }
        if !self.model_path.is_file() {
            return Err(CoreError::Config(format!(
                "model file not found: {}",
                self.model_path.display()
            )));
        }
        if self.detection.scale_factor <= 1.0 {
            return Err(CoreError::Config(format!(
                "detector scale factor must be above 1.0, got {}",
                self.detection.scale_factor
            )));
        }
        if self.detection.min_size == 0 {
            return Err(CoreError::Config(
                "detector minimum size must be at least 1".to_string(),
            ));
        }
        self.classifier.validate()?;
        self.stats.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_on_paths() {
        // "." is a directory, not a file.
        assert!(CoreConfig::default().validate().is_err());
    }

    #[test]
    fn validation_checks_detector_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let model = dir.path().join("model.json");
        std::fs::write(&input, b"x").unwrap();
        std::fs::write(&model, b"x").unwrap();

        let mut config = CoreConfig {
            input_path: input,
            model_path: model,
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.detection.scale_factor = 1.0;
        assert!(config.validate().is_err());
    }
}

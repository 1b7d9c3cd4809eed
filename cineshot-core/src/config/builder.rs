//! Builder pattern for `CoreConfig`.
//!
//! Provides a fluent API over the nested configuration sections so callers
//! can override individual knobs without constructing the section structs
//! by hand.

use std::path::PathBuf;

use super::CoreConfig;
use crate::classification::ClassifierConfig;
use crate::detection::DetectionConfig;
use crate::statistics::StatsConfig;

/// Builder for creating `CoreConfig` instances.
///
/// # Examples
///
/// ```rust
/// use cineshot_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_path(PathBuf::from("film.mp4"))
///     .model_path(PathBuf::from("face.json"))
///     .output_dir(PathBuf::from("out"))
///     .input_step(2)
///     .oversample(5)
///     .detect_cuts(true)
///     .build();
/// assert_eq!(config.stats.input_step, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    input_path: Option<PathBuf>,
    model_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    detection: DetectionConfig,
    classifier: ClassifierConfig,
    stats: StatsConfig,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }

    pub fn model_path(mut self, path: PathBuf) -> Self {
        self.model_path = Some(path);
        self
    }

    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }

    /// Replaces the whole detection section.
    pub fn detection(mut self, detection: DetectionConfig) -> Self {
        self.detection = detection;
        self
    }

    /// Replaces the whole classifier section.
    pub fn classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replaces the whole statistics section.
    pub fn stats(mut self, stats: StatsConfig) -> Self {
        self.stats = stats;
        self
    }

    pub fn scale_factor(mut self, scale_factor: f64) -> Self {
        self.detection.scale_factor = scale_factor;
        self
    }

    pub fn min_neighbors(mut self, min_neighbors: u32) -> Self {
        self.detection.min_neighbors = min_neighbors;
        self
    }

    pub fn min_size(mut self, min_size: u32) -> Self {
        self.detection.min_size = min_size;
        self
    }

    pub fn close_up_ratio(mut self, ratio: f64) -> Self {
        self.classifier.close_up_ratio = ratio;
        self
    }

    pub fn medium_ratio(mut self, ratio: f64) -> Self {
        self.classifier.medium_ratio = ratio;
        self
    }

    pub fn input_step(mut self, step: usize) -> Self {
        self.stats.input_step = step;
        self
    }

    pub fn oversample(mut self, window: usize) -> Self {
        self.stats.input_oversample = window;
        self
    }

    pub fn entropy_window(mut self, window: usize) -> Self {
        self.stats.entropy_window = window;
        self
    }

    pub fn entropy_variance_window(mut self, window: usize) -> Self {
        self.stats.entropy_variance_window = window;
        self
    }

    pub fn detect_cuts(mut self, enabled: bool) -> Self {
        self.stats.detect_cuts = enabled;
        self
    }

    pub fn cut_entropy_threshold(mut self, threshold: f64) -> Self {
        self.stats.cut_entropy_threshold = threshold;
        self
    }

    pub fn cut_entropy_jump(mut self, jump: f64) -> Self {
        self.stats.cut_entropy_jump = jump;
        self
    }

    /// Builds the configuration. Unset paths fall back to the `Default`
    /// placeholders; `CoreConfig::validate` catches them before a run.
    pub fn build(self) -> CoreConfig {
        let defaults = CoreConfig::default();
        CoreConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            model_path: self.model_path.unwrap_or(defaults.model_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            detection: self.detection,
            classifier: self.classifier,
            stats: self.stats,
        }
    }
}

//! Cascade model format and per-window evaluation.
//!
//! Models are JSON files describing a boosted cascade of weighted-rectangle
//! weak classifiers over a fixed base window. Window evaluation follows the
//! classic cascade scheme: stages are tried in order, each stage sums its
//! weak classifier votes, and the window is rejected as soon as a stage sum
//! falls below the stage threshold. Feature values are normalized by the
//! window's standard deviation so detection is robust to brightness and
//! contrast changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::integral::IntegralImage;
use crate::error::{CoreError, CoreResult};

/// A rectangle inside the base detection window, with a feature weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub weight: f64,
}

/// A single weak classifier: a thresholded weighted-rectangle feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakClassifier {
    pub rects: Vec<WeightedRect>,
    /// Feature threshold, scaled at runtime by the window standard deviation.
    pub threshold: f64,
    /// Vote contributed when the feature value is below the threshold.
    pub fail_value: f64,
    /// Vote contributed when the feature value meets the threshold.
    pub pass_value: f64,
}

/// One rejection stage of the cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Minimum sum of weak classifier votes required to pass the stage.
    pub threshold: f64,
    pub classifiers: Vec<WeakClassifier>,
}

/// A complete cascade model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeModel {
    /// Label attached to every detection (e.g., "face").
    pub label: String,
    /// Base detection window width in pixels.
    pub window_width: u32,
    /// Base detection window height in pixels.
    pub window_height: u32,
    pub stages: Vec<Stage>,
}

impl CascadeModel {
    /// Loads and validates a cascade model from a JSON file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CoreError::Model(format!("failed to read {}: {e}", path.display()))
        })?;
        let model: Self = serde_json::from_str(&text).map_err(|e| {
            CoreError::Model(format!("failed to parse {}: {e}", path.display()))
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Checks structural invariants: non-degenerate window, at least one
    /// stage, and every feature rectangle contained in the base window.
    pub fn validate(&self) -> CoreResult<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(CoreError::Model(format!(
                "model '{}' has a degenerate {}x{} window",
                self.label, self.window_width, self.window_height
            )));
        }
        if self.stages.is_empty() {
            return Err(CoreError::Model(format!(
                "model '{}' has no stages",
                self.label
            )));
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.classifiers.is_empty() {
                return Err(CoreError::Model(format!(
                    "model '{}' stage {i} has no classifiers",
                    self.label
                )));
            }
            for wc in &stage.classifiers {
                if wc.rects.is_empty() {
                    return Err(CoreError::Model(format!(
                        "model '{}' stage {i} has a featureless classifier",
                        self.label
                    )));
                }
                for r in &wc.rects {
                    if r.width == 0
                        || r.height == 0
                        || r.x + r.width > self.window_width
                        || r.y + r.height > self.window_height
                    {
                        return Err(CoreError::Model(format!(
                            "model '{}' stage {i} has a rect outside the {}x{} window",
                            self.label, self.window_width, self.window_height
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Evaluates the cascade at window position (x, y) for the given scale.
    ///
    /// Returns true when every stage accepts the window.
    pub fn evaluate_window(&self, integral: &IntegralImage, x: u32, y: u32, scale: f64) -> bool {
        let sw = scaled(self.window_width, scale);
        let sh = scaled(self.window_height, scale);
        let inv_area = 1.0 / (f64::from(sw) * f64::from(sh));

        let sum = integral.rect_sum(x, y, sw, sh) as f64;
        let squared_sum = integral.rect_squared_sum(x, y, sw, sh) as f64;
        let mean = sum * inv_area;
        let variance = squared_sum * inv_area - mean * mean;
        // Flat windows get a unit deviation so thresholds stay meaningful.
        let std_dev = if variance > 1.0 { variance.sqrt() } else { 1.0 };

        for stage in &self.stages {
            let mut stage_sum = 0.0;
            for wc in &stage.classifiers {
                let mut feature = 0.0;
                for r in &wc.rects {
                    let rx = x + scaled(r.x, scale);
                    let ry = y + scaled(r.y, scale);
                    let rw = scaled(r.width, scale);
                    let rh = scaled(r.height, scale);
                    feature += integral.rect_sum(rx, ry, rw, rh) as f64 * r.weight;
                }
                feature *= inv_area;

                stage_sum += if feature < wc.threshold * std_dev {
                    wc.fail_value
                } else {
                    wc.pass_value
                };
            }
            if stage_sum < stage.threshold {
                return false;
            }
        }
        true
    }
}

#[inline]
fn scaled(value: u32, scale: f64) -> u32 {
    (f64::from(value) * scale).round() as u32
}

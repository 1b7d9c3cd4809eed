//! Heuristic shot type classification.
//!
//! The classifier maps the largest-object-to-frame area ratio onto the
//! cinematic shot scale: a face filling a large share of the frame is a
//! close-up, a moderate share is a medium shot, a small share is a wide
//! shot. Ratios near a class boundary split probability mass between the
//! two adjacent classes so the downstream entropy statistics see soft
//! distributions rather than hard 0/1 flips.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classification::ShotFeatures;
use crate::error::{CoreError, CoreResult};

/// Largest-object ratio at or above which a frame is a close-up.
pub const DEFAULT_CLOSE_UP_RATIO: f64 = 0.10;

/// Largest-object ratio at or above which a frame is a medium shot.
pub const DEFAULT_MEDIUM_RATIO: f64 = 0.02;

/// Detections smaller than this area (pixels) are ignored as noise.
pub const DEFAULT_MIN_OBJECT_AREA: f64 = 100.0;

/// Half-width of the probability blend band around each ratio threshold,
/// as a fraction of the threshold itself.
const BLEND_BAND: f64 = 0.25;

/// Fraction of probability mass shifted toward Wide when the frame shows
/// subjects at strongly different depths (largest > 4x smallest).
const DEPTH_CUE_SHIFT: f64 = 0.25;

/// The type of cinematic shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShotType {
    /// A close-up shot, typically a large face
    CloseUp,
    /// A medium shot, e.g., upper body
    Medium,
    /// A wide shot, showing full figures or environment
    Wide,
    /// Could not determine shot type
    Unknown,
}

impl ShotType {
    /// All shot types, in declaration order.
    pub const ALL: [ShotType; 4] = [
        ShotType::CloseUp,
        ShotType::Medium,
        ShotType::Wide,
        ShotType::Unknown,
    ];
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShotType::CloseUp => "close-up",
            ShotType::Medium => "medium",
            ShotType::Wide => "wide",
            ShotType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl FromStr for ShotType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "close-up" | "closeup" | "close_up" => Ok(ShotType::CloseUp),
            "medium" => Ok(ShotType::Medium),
            "wide" => Ok(ShotType::Wide),
            "unknown" => Ok(ShotType::Unknown),
            other => Err(CoreError::GroundTruth(format!(
                "unknown shot type label '{other}'"
            ))),
        }
    }
}

/// Result of classifying a single frame.
///
/// `probabilities` always contains every `ShotType` key and sums to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Most probable shot type
    pub predicted: ShotType,
    /// Probability distribution across shot types
    pub probabilities: BTreeMap<ShotType, f64>,
}

impl ClassificationResult {
    /// A result with all mass on one type.
    pub fn certain(predicted: ShotType) -> Self {
        let mut probabilities = zero_distribution();
        probabilities.insert(predicted, 1.0);
        Self {
            predicted,
            probabilities,
        }
    }

    /// A maximally uncertain result: Unknown with a uniform distribution.
    pub fn unknown() -> Self {
        let n = ShotType::ALL.len() as f64;
        let probabilities = ShotType::ALL.iter().map(|&t| (t, 1.0 / n)).collect();
        Self {
            predicted: ShotType::Unknown,
            probabilities,
        }
    }
}

fn zero_distribution() -> BTreeMap<ShotType, f64> {
    ShotType::ALL.iter().map(|&t| (t, 0.0)).collect()
}

/// Thresholds controlling shot type classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Largest-object ratio at or above which a frame is a close-up
    pub close_up_ratio: f64,
    /// Largest-object ratio at or above which a frame is a medium shot
    pub medium_ratio: f64,
    /// Minimum object area (pixels) for a detection to count
    pub min_object_area: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            close_up_ratio: DEFAULT_CLOSE_UP_RATIO,
            medium_ratio: DEFAULT_MEDIUM_RATIO,
            min_object_area: DEFAULT_MIN_OBJECT_AREA,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if !(0.0..=1.0).contains(&self.close_up_ratio) || !(0.0..=1.0).contains(&self.medium_ratio)
        {
            return Err(CoreError::Config(
                "shot ratio thresholds must lie in 0..=1".to_string(),
            ));
        }
        if self.medium_ratio >= self.close_up_ratio {
            return Err(CoreError::Config(format!(
                "medium ratio {} must be below close-up ratio {}",
                self.medium_ratio, self.close_up_ratio
            )));
        }
        // Blend bands around the two thresholds must not overlap.
        if self.medium_ratio * (1.0 + BLEND_BAND) >= self.close_up_ratio * (1.0 - BLEND_BAND) {
            return Err(CoreError::Config(
                "shot ratio thresholds are too close together".to_string(),
            ));
        }
        if self.min_object_area < 0.0 {
            return Err(CoreError::Config(
                "minimum object area cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Classifies the type of cinematic shot from extracted features.
#[derive(Debug, Clone, Default)]
pub struct ShotClassifier {
    config: ClassifierConfig,
}

impl ShotClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classifies a frame from its extracted features.
    pub fn classify(&self, features: &ShotFeatures) -> ClassificationResult {
        let usable: Vec<f64> = features
            .object_areas
            .iter()
            .copied()
            .filter(|&a| a >= self.config.min_object_area)
            .collect();

        let Some(&largest) = usable.first() else {
            return ClassificationResult::unknown();
        };

        if features.total_area <= 0.0 {
            return ClassificationResult::unknown();
        }
        let ratio = largest / features.total_area;

        let mut probabilities = zero_distribution();
        blend(
            &mut probabilities,
            ratio,
            self.config.medium_ratio,
            self.config.close_up_ratio,
        );

        // Subjects at strongly different depths suggest a wider framing
        // than the largest face alone would.
        if usable.len() >= 2 {
            let smallest = *usable.last().unwrap_or(&largest);
            if smallest > 0.0 && largest > 4.0 * smallest {
                shift_toward_wide(&mut probabilities);
            }
        }

        let predicted = probabilities
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&t, _)| t)
            .unwrap_or(ShotType::Unknown);

        ClassificationResult {
            predicted,
            probabilities,
        }
    }
}

/// Assigns probability mass for `ratio` against the two class thresholds.
fn blend(probabilities: &mut BTreeMap<ShotType, f64>, ratio: f64, medium_at: f64, close_up_at: f64) {
    let assign = |probabilities: &mut BTreeMap<ShotType, f64>, t: ShotType, p: f64| {
        probabilities.insert(t, p);
    };

    let cu_low = close_up_at * (1.0 - BLEND_BAND);
    let cu_high = close_up_at * (1.0 + BLEND_BAND);
    let med_low = medium_at * (1.0 - BLEND_BAND);
    let med_high = medium_at * (1.0 + BLEND_BAND);

    if ratio >= cu_high {
        assign(probabilities, ShotType::CloseUp, 1.0);
    } else if ratio > cu_low {
        let frac = (ratio - cu_low) / (cu_high - cu_low);
        assign(probabilities, ShotType::CloseUp, frac);
        assign(probabilities, ShotType::Medium, 1.0 - frac);
    } else if ratio >= med_high {
        assign(probabilities, ShotType::Medium, 1.0);
    } else if ratio > med_low {
        let frac = (ratio - med_low) / (med_high - med_low);
        assign(probabilities, ShotType::Medium, frac);
        assign(probabilities, ShotType::Wide, 1.0 - frac);
    } else {
        assign(probabilities, ShotType::Wide, 1.0);
    }
}

/// Moves a fixed share of all non-Wide mass onto Wide.
fn shift_toward_wide(probabilities: &mut BTreeMap<ShotType, f64>) {
    let mut moved = 0.0;
    for (&t, p) in probabilities.iter_mut() {
        if t != ShotType::Wide {
            let share = *p * DEPTH_CUE_SHIFT;
            *p -= share;
            moved += share;
        }
    }
    if let Some(p) = probabilities.get_mut(&ShotType::Wide) {
        *p += moved;
    }
}

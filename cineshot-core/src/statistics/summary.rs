//! Human-readable film summary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classification::ShotType;

/// Aggregated shot distribution of a whole film.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmSummary {
    /// Frames submitted to the evaluator
    pub total_frames: u64,
    /// Frames actually evaluated (after `input_step` subsampling)
    pub evaluated_frames: u64,
    /// Count of each (oversampled) shot type
    pub shot_counts: BTreeMap<ShotType, u64>,
    /// Most frequent shot type, if any frames were evaluated
    pub dominant_shot_type: Option<ShotType>,
    /// Number of detected cuts
    pub cut_count: usize,
    /// Mean post-warm-up entropy, if available
    pub mean_entropy: Option<f64>,
}

impl FilmSummary {
    pub fn new(
        total_frames: u64,
        evaluated_frames: u64,
        shot_counts: BTreeMap<ShotType, u64>,
        cut_count: usize,
        mean_entropy: Option<f64>,
    ) -> Self {
        let dominant_shot_type = shot_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .filter(|(_, &count)| count > 0)
            .map(|(&t, _)| t);
        Self {
            total_frames,
            evaluated_frames,
            shot_counts,
            dominant_shot_type,
            cut_count,
            mean_entropy,
        }
    }

    /// Share of evaluated frames classified as `shot_type`, in 0..=100.
    pub fn percentage(&self, shot_type: ShotType) -> f64 {
        if self.evaluated_frames == 0 {
            return 0.0;
        }
        let count = self.shot_counts.get(&shot_type).copied().unwrap_or(0);
        100.0 * count as f64 / self.evaluated_frames as f64
    }
}

impl fmt::Display for FilmSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Frames: {} total, {} evaluated",
            self.total_frames, self.evaluated_frames
        )?;
        for shot_type in ShotType::ALL {
            let count = self.shot_counts.get(&shot_type).copied().unwrap_or(0);
            writeln!(
                f,
                "  {:<9} {:>8}  ({:5.1}%)",
                shot_type.to_string(),
                count,
                self.percentage(shot_type)
            )?;
        }
        if let Some(dominant) = self.dominant_shot_type {
            writeln!(f, "Dominant shot type: {dominant}")?;
        }
        writeln!(f, "Detected cuts: {}", self.cut_count)?;
        if let Some(mean) = self.mean_entropy {
            writeln!(f, "Mean entropy: {mean:.3} bits")?;
        }
        Ok(())
    }
}

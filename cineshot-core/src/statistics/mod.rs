//! Film-level statistics over per-frame classification results.
//!
//! `FilmStatistics` aggregates a stream of `ClassificationResult`s into:
//!
//! - an oversampled (sliding-window majority) shot type per frame,
//! - shot type counts and a shot type time series,
//! - a probability time series,
//! - sliding-window Shannon entropy and its variance over time,
//! - entropy-based cut detection.
//!
//! Frames can be subsampled with `input_step`. The evaluator measures the
//! per-frame interval once, at the end of a warm-up period of twice the
//! largest window, and uses it to re-center window-derived samples on the
//! middle of their window.

pub mod export;
mod summary;

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::classification::{ClassificationResult, ShotType};
use crate::error::{CoreError, CoreResult};

pub use summary::FilmSummary;

/// Default frame step (1 = every frame).
pub const DEFAULT_INPUT_STEP: usize = 1;

/// Default oversampling window size.
pub const DEFAULT_INPUT_OVERSAMPLE: usize = 1;

/// Default window size for mean entropy over time.
pub const DEFAULT_ENTROPY_WINDOW: usize = 20;

/// Default window size for entropy variance.
pub const DEFAULT_ENTROPY_VARIANCE_WINDOW: usize = 30;

/// Default absolute entropy required to consider a cut.
pub const DEFAULT_CUT_ENTROPY_THRESHOLD: f64 = 1.3;

/// Default entropy jump between frames required to confirm a cut.
pub const DEFAULT_CUT_ENTROPY_JUMP: f64 = 0.3;

/// Default minimum spacing between detected cuts, in evaluated frames.
pub const DEFAULT_CUT_HISTORY_WINDOW: usize = 15;

/// Configuration for the statistical evaluation of a film.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Frame step size: how many frames to advance per evaluation
    /// (1 = every frame, 2 = every second frame)
    pub input_step: usize,
    /// Number of recent results aggregated into each oversampled result
    pub input_oversample: usize,

    /// Window size for entropy calculation over time
    pub entropy_window: usize,
    /// Window size for entropy variance calculation
    pub entropy_variance_window: usize,

    /// Interval for the probability / shot type time series (0 = disabled)
    pub prob_series_interval: usize,
    /// Interval for the entropy time series (0 = disabled)
    pub entropy_series_interval: usize,
    /// Interval for the entropy variance time series (0 = disabled)
    pub entropy_variance_series_interval: usize,

    /// Whether entropy-based cut detection is enabled
    pub detect_cuts: bool,
    /// Absolute entropy required to consider a cut
    pub cut_entropy_threshold: f64,
    /// Entropy difference between frames required to confirm a cut
    pub cut_entropy_jump: f64,
    /// Minimum number of evaluated frames between consecutive cuts
    pub cut_history_window: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            input_step: DEFAULT_INPUT_STEP,
            input_oversample: DEFAULT_INPUT_OVERSAMPLE,
            entropy_window: DEFAULT_ENTROPY_WINDOW,
            entropy_variance_window: DEFAULT_ENTROPY_VARIANCE_WINDOW,
            prob_series_interval: 1,
            entropy_series_interval: 1,
            entropy_variance_series_interval: 1,
            detect_cuts: true,
            cut_entropy_threshold: DEFAULT_CUT_ENTROPY_THRESHOLD,
            cut_entropy_jump: DEFAULT_CUT_ENTROPY_JUMP,
            cut_history_window: DEFAULT_CUT_HISTORY_WINDOW,
        }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.input_step == 0 {
            return Err(CoreError::Config("input step must be at least 1".into()));
        }
        if self.input_oversample == 0 {
            return Err(CoreError::Config(
                "oversample window must be at least 1".into(),
            ));
        }
        if self.entropy_window == 0 || self.entropy_variance_window == 0 {
            return Err(CoreError::Config(
                "entropy windows must be at least 1".into(),
            ));
        }
        if self.detect_cuts && self.cut_entropy_jump < 0.0 {
            return Err(CoreError::Config(
                "cut entropy jump cannot be negative".into(),
            ));
        }
        Ok(())
    }

    /// Evaluated frames to wait before emitting window-derived series:
    /// twice the largest configured window.
    fn warmup_frames(&self) -> u64 {
        let largest = self
            .input_oversample
            .max(self.entropy_window)
            .max(self.entropy_variance_window);
        2 * largest as u64
    }
}

/// A timestamped probability distribution sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbSample {
    pub timestamp_ms: f64,
    pub probabilities: BTreeMap<ShotType, f64>,
}

/// A timestamped shot type sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSample {
    pub timestamp_ms: f64,
    pub shot_type: ShotType,
}

/// A timestamped scalar sample (entropy, entropy variance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueSample {
    pub timestamp_ms: f64,
    pub value: f64,
}

/// Collects and analyzes shot type data across a sequence of frames.
pub struct FilmStatistics {
    config: StatsConfig,

    total_frames: u64,
    evaluated_frames: u64,

    /// Measured per-evaluated-frame interval, known after warm-up.
    frame_interval_ms: Option<f64>,
    current_timestamp_ms: f64,

    oversample_window: VecDeque<ClassificationResult>,
    entropy_window: VecDeque<ClassificationResult>,
    entropy_history: VecDeque<f64>,

    current: ClassificationResult,
    entropy: f64,
    last_entropy: f64,
    entropy_variance: f64,
    entropy_sum: f64,
    entropy_samples: u64,

    shot_counts: BTreeMap<ShotType, u64>,
    last_cut_frame: Option<u64>,

    prob_series: Vec<ProbSample>,
    shot_type_series: Vec<TypeSample>,
    entropy_series: Vec<ValueSample>,
    entropy_variance_series: Vec<ValueSample>,
    cuts: Vec<f64>,
}

impl FilmStatistics {
    pub fn new(config: StatsConfig) -> Self {
        Self {
            config,
            total_frames: 0,
            evaluated_frames: 0,
            frame_interval_ms: None,
            current_timestamp_ms: 0.0,
            oversample_window: VecDeque::new(),
            entropy_window: VecDeque::new(),
            entropy_history: VecDeque::new(),
            current: ClassificationResult::unknown(),
            entropy: 0.0,
            last_entropy: 0.0,
            entropy_variance: 0.0,
            entropy_sum: 0.0,
            entropy_samples: 0,
            shot_counts: BTreeMap::new(),
            last_cut_frame: None,
            prob_series: Vec::new(),
            shot_type_series: Vec::new(),
            entropy_series: Vec::new(),
            entropy_variance_series: Vec::new(),
            cuts: Vec::new(),
        }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Adds the classification result for a single frame.
    ///
    /// Frames that do not land on the configured `input_step` are counted
    /// but not evaluated.
    pub fn add_frame_result(&mut self, timestamp_ms: f64, result: ClassificationResult) {
        self.total_frames += 1;
        if self.total_frames % self.config.input_step as u64 != 0 {
            return;
        }

        self.evaluated_frames += 1;
        self.current_timestamp_ms = timestamp_ms;

        // Measure the per-frame interval once, at the end of warm-up; the
        // series timestamps need it to re-center window samples.
        let warmup = self.config.warmup_frames();
        if self.frame_interval_ms.is_none() && self.evaluated_frames == warmup && warmup > 1 {
            self.frame_interval_ms = Some(timestamp_ms / (warmup - 1) as f64);
        }

        push_capped(
            &mut self.oversample_window,
            result.clone(),
            self.config.input_oversample,
        );
        push_capped(&mut self.entropy_window, result, self.config.entropy_window);

        self.oversample();
        *self.shot_counts.entry(self.current.predicted).or_insert(0) += 1;

        self.compute_entropy();
        self.compute_entropy_variance();
        if self.config.detect_cuts {
            self.detect_cut();
        }
        self.append_series();

        self.last_entropy = self.entropy;
    }

    /// Collapses the oversampling window into the current result.
    fn oversample(&mut self) {
        let mut aggregated = aggregate_probs(self.oversample_window.iter());
        normalize_probs(&mut aggregated);

        let predicted = aggregated
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&t, _)| t)
            .unwrap_or(ShotType::Unknown);

        self.current = ClassificationResult {
            predicted,
            probabilities: aggregated,
        };
    }

    /// Shannon entropy (log2) of the aggregate over the entropy window.
    fn compute_entropy(&mut self) {
        let mut aggregated = aggregate_probs(self.entropy_window.iter());
        normalize_probs(&mut aggregated);

        self.entropy = aggregated
            .values()
            .filter(|&&p| p > 0.0)
            .map(|&p| -p * p.log2())
            .sum();

        if self.evaluated_frames > self.config.warmup_frames() {
            self.entropy_sum += self.entropy;
            self.entropy_samples += 1;
        }
    }

    /// Sample variance of recent entropy values.
    fn compute_entropy_variance(&mut self) {
        push_capped(
            &mut self.entropy_history,
            self.entropy,
            self.config.entropy_variance_window,
        );

        if self.entropy_history.len() <= 1 {
            self.entropy_variance = 0.0;
            return;
        }

        let n = self.entropy_history.len() as f64;
        let mean = self.entropy_history.iter().sum::<f64>() / n;
        self.entropy_variance = self
            .entropy_history
            .iter()
            .map(|e| (e - mean) * (e - mean))
            .sum::<f64>()
            / (n - 1.0);
    }

    /// Entropy-based cut detection.
    ///
    /// A cut requires high absolute entropy, a large jump from the previous
    /// frame, and a minimum spacing since the last detected cut. Runs only
    /// after warm-up so the jump baseline is meaningful.
    fn detect_cut(&mut self) {
        if self.evaluated_frames <= self.config.warmup_frames() {
            return;
        }

        let spaced_out = match self.last_cut_frame {
            Some(frame) => {
                self.evaluated_frames - frame >= self.config.cut_history_window as u64
            }
            None => true,
        };

        if spaced_out
            && self.entropy > self.config.cut_entropy_threshold
            && (self.entropy - self.last_entropy).abs() > self.config.cut_entropy_jump
        {
            self.last_cut_frame = Some(self.evaluated_frames);
            self.cuts.push(self.centered_timestamp(self.config.entropy_window));
        }
    }

    /// Appends the enabled time series at their configured intervals.
    fn append_series(&mut self) {
        if self.evaluated_frames <= self.config.warmup_frames() {
            return;
        }

        let interval_hit = |interval: usize, frame: u64| -> bool {
            interval > 0 && frame % interval as u64 == 0
        };

        if interval_hit(self.config.prob_series_interval, self.evaluated_frames) {
            let timestamp_ms = self.centered_timestamp(self.config.input_oversample);
            self.prob_series.push(ProbSample {
                timestamp_ms,
                probabilities: self.current.probabilities.clone(),
            });
            self.shot_type_series.push(TypeSample {
                timestamp_ms,
                shot_type: self.current.predicted,
            });
        }

        if interval_hit(self.config.entropy_series_interval, self.evaluated_frames) {
            self.entropy_series.push(ValueSample {
                timestamp_ms: self.centered_timestamp(self.config.entropy_window),
                value: self.entropy,
            });
        }

        if interval_hit(
            self.config.entropy_variance_series_interval,
            self.evaluated_frames,
        ) {
            self.entropy_variance_series.push(ValueSample {
                timestamp_ms: self.centered_timestamp(self.config.entropy_variance_window),
                value: self.entropy_variance,
            });
        }
    }

    /// Current timestamp shifted back by half a window, so window-derived
    /// values sit over the middle of the data they describe.
    fn centered_timestamp(&self, window: usize) -> f64 {
        let interval = self.frame_interval_ms.unwrap_or(0.0);
        self.current_timestamp_ms - interval * (window as f64 / 2.0).round()
    }

    // --- accessors ---

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn evaluated_frames(&self) -> u64 {
        self.evaluated_frames
    }

    /// The most recent oversampled result.
    pub fn current_result(&self) -> &ClassificationResult {
        &self.current
    }

    pub fn current_entropy(&self) -> f64 {
        self.entropy
    }

    pub fn current_entropy_variance(&self) -> f64 {
        self.entropy_variance
    }

    pub fn shot_counts(&self) -> &BTreeMap<ShotType, u64> {
        &self.shot_counts
    }

    pub fn prob_series(&self) -> &[ProbSample] {
        &self.prob_series
    }

    pub fn shot_type_series(&self) -> &[TypeSample] {
        &self.shot_type_series
    }

    pub fn entropy_series(&self) -> &[ValueSample] {
        &self.entropy_series
    }

    pub fn entropy_variance_series(&self) -> &[ValueSample] {
        &self.entropy_variance_series
    }

    /// Timestamps (ms) of detected cuts.
    pub fn cuts(&self) -> &[f64] {
        &self.cuts
    }

    /// Builds the film summary from the collected counts.
    pub fn summary(&self) -> FilmSummary {
        let mean_entropy = if self.entropy_samples > 0 {
            Some(self.entropy_sum / self.entropy_samples as f64)
        } else {
            None
        };
        FilmSummary::new(
            self.total_frames,
            self.evaluated_frames,
            self.shot_counts.clone(),
            self.cuts.len(),
            mean_entropy,
        )
    }
}

fn push_capped<T>(window: &mut VecDeque<T>, value: T, cap: usize) {
    window.push_back(value);
    while window.len() > cap {
        window.pop_front();
    }
}

/// Sums the probability distributions of all results in a window.
fn aggregate_probs<'a>(
    window: impl Iterator<Item = &'a ClassificationResult>,
) -> BTreeMap<ShotType, f64> {
    let mut aggregated: BTreeMap<ShotType, f64> =
        ShotType::ALL.iter().map(|&t| (t, 0.0)).collect();
    for sample in window {
        for (&shot_type, &p) in &sample.probabilities {
            *aggregated.entry(shot_type).or_insert(0.0) += p;
        }
    }
    aggregated
}

/// Normalizes a distribution in place; an all-zero distribution degrades to
/// uniform.
fn normalize_probs(probs: &mut BTreeMap<ShotType, f64>) {
    if probs.is_empty() {
        return;
    }
    let total: f64 = probs.values().sum();
    if total == 0.0 {
        let uniform = 1.0 / probs.len() as f64;
        for p in probs.values_mut() {
            *p = uniform;
        }
        return;
    }
    for p in probs.values_mut() {
        *p /= total;
    }
}

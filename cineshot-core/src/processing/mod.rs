//! The frame-by-frame analysis pipeline.
//!
//! Ties the pieces together: frames are pulled from a source, features are
//! detected and extracted, each frame is classified, and results feed the
//! film statistics evaluator.

use std::time::Instant;

use log::{debug, info};

use crate::classification::{extract_features, ShotClassifier};
use crate::config::CoreConfig;
use crate::detection::{CascadeModel, FeatureDetector};
use crate::error::CoreResult;
use crate::source::{open_source, FrameSource};
use crate::statistics::export::FilmReport;
use crate::statistics::FilmStatistics;

/// Drives a frame source through the full pipeline.
///
/// The progress callback receives the number of frames consumed so far.
/// Returns the total frame count.
pub fn analyze_source(
    source: &mut dyn FrameSource,
    detector: &FeatureDetector,
    classifier: &ShotClassifier,
    stats: &mut FilmStatistics,
    progress: &mut dyn FnMut(u64),
) -> CoreResult<u64> {
    let mut frames = 0u64;

    while let Some(frame) = source.next_frame()? {
        let detections = detector.detect(&frame);
        let features = extract_features(&frame, &detections);
        let result = classifier.classify(&features);

        debug!(
            "frame {} @ {:.0} ms: {} detections, predicted {}",
            frames,
            frame.timestamp_ms(),
            detections.len(),
            result.predicted
        );

        stats.add_frame_result(frame.timestamp_ms(), result);
        frames += 1;
        progress(frames);
    }

    Ok(frames)
}

/// Runs a complete analysis as described by `config`.
pub fn run_analysis(config: &CoreConfig) -> CoreResult<FilmReport> {
    run_analysis_with_progress(config, &mut |_| {})
}

/// Like [`run_analysis`], with a per-frame progress callback.
pub fn run_analysis_with_progress(
    config: &CoreConfig,
    progress: &mut dyn FnMut(u64),
) -> CoreResult<FilmReport> {
    config.validate()?;

    let model = CascadeModel::from_json_file(&config.model_path)?;
    info!(
        "Loaded cascade model '{}' ({} stages)",
        model.label,
        model.stages.len()
    );

    let detector = FeatureDetector::new(model, config.detection);
    let classifier = ShotClassifier::new(config.classifier);
    let mut stats = FilmStatistics::new(config.stats.clone());
    let mut source = open_source(&config.input_path)?;

    let start = Instant::now();
    let frames = analyze_source(
        source.as_mut(),
        &detector,
        &classifier,
        &mut stats,
        progress,
    )?;
    info!(
        "Analyzed {} frames of {} in {:.1?}",
        frames,
        config.input_path.display(),
        start.elapsed()
    );

    Ok(stats.into_report(&config.input_path))
}

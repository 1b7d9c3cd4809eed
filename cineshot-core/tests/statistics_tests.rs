// cineshot-core/tests/statistics_tests.rs
//
// End-to-end behavior of the film statistics evaluator: oversampling,
// subsampling, entropy, series emission, and cut detection.

use approx::assert_relative_eq;
use cineshot_core::{ClassificationResult, FilmStatistics, ShotType, StatsConfig};
use std::path::Path;

fn config(
    oversample: usize,
    entropy_window: usize,
    variance_window: usize,
) -> StatsConfig {
    StatsConfig {
        input_step: 1,
        input_oversample: oversample,
        entropy_window,
        entropy_variance_window: variance_window,
        ..StatsConfig::default()
    }
}

fn feed(stats: &mut FilmStatistics, results: &[ShotType]) {
    for (i, &shot_type) in results.iter().enumerate() {
        stats.add_frame_result(i as f64 * 40.0, ClassificationResult::certain(shot_type));
    }
}

#[test]
fn oversampling_takes_window_majority() {
    let mut stats = FilmStatistics::new(config(3, 1, 1));
    feed(
        &mut stats,
        &[ShotType::Wide, ShotType::Wide, ShotType::Medium],
    );

    let current = stats.current_result();
    assert_eq!(current.predicted, ShotType::Wide);
    assert_relative_eq!(current.probabilities[&ShotType::Wide], 2.0 / 3.0);
    assert_relative_eq!(current.probabilities[&ShotType::Medium], 1.0 / 3.0);
}

#[test]
fn input_step_subsamples_frames() {
    let mut stats = FilmStatistics::new(StatsConfig {
        input_step: 2,
        ..config(1, 1, 1)
    });
    feed(&mut stats, &[ShotType::Wide; 10]);

    assert_eq!(stats.total_frames(), 10);
    assert_eq!(stats.evaluated_frames(), 5);
    assert_eq!(stats.shot_counts()[&ShotType::Wide], 5);
}

#[test]
fn entropy_reflects_window_uncertainty() {
    let mut stats = FilmStatistics::new(config(1, 2, 1));

    // Two identical frames: zero entropy.
    feed(&mut stats, &[ShotType::Wide, ShotType::Wide]);
    assert_relative_eq!(stats.current_entropy(), 0.0);

    // Window now holds one Wide and one Medium: exactly one bit.
    stats.add_frame_result(80.0, ClassificationResult::certain(ShotType::Medium));
    assert_relative_eq!(stats.current_entropy(), 1.0);
}

#[test]
fn entropy_variance_needs_multiple_samples() {
    let mut stats = FilmStatistics::new(config(1, 2, 4));

    stats.add_frame_result(0.0, ClassificationResult::certain(ShotType::Wide));
    assert_relative_eq!(stats.current_entropy_variance(), 0.0);

    // Alternate types so window entropy oscillates between 0 and 1.
    feed(
        &mut stats,
        &[ShotType::Wide, ShotType::Medium, ShotType::Medium],
    );
    assert!(stats.current_entropy_variance() > 0.0);
}

#[test]
fn series_start_after_warmup_with_centered_timestamps() {
    // All windows are 1, so warm-up is 2 evaluated frames.
    let mut stats = FilmStatistics::new(config(1, 1, 1));
    feed(&mut stats, &[ShotType::Wide; 5]);

    // Frames 3, 4, 5 emit samples.
    assert_eq!(stats.prob_series().len(), 3);
    assert_eq!(stats.shot_type_series().len(), 3);
    assert_eq!(stats.entropy_series().len(), 3);
    assert_eq!(stats.entropy_variance_series().len(), 3);

    // Interval measured over warm-up is 40 ms; a window of 1 re-centers
    // samples by one interval.
    assert_relative_eq!(stats.prob_series()[0].timestamp_ms, 40.0);
    assert_relative_eq!(stats.prob_series()[1].timestamp_ms, 80.0);
    assert_eq!(stats.shot_type_series()[0].shot_type, ShotType::Wide);
}

#[test]
fn disabled_series_stay_empty() {
    let mut stats = FilmStatistics::new(StatsConfig {
        prob_series_interval: 0,
        entropy_series_interval: 0,
        entropy_variance_series_interval: 0,
        ..config(1, 1, 1)
    });
    feed(&mut stats, &[ShotType::Wide; 10]);

    assert!(stats.prob_series().is_empty());
    assert!(stats.shot_type_series().is_empty());
    assert!(stats.entropy_series().is_empty());
    assert!(stats.entropy_variance_series().is_empty());
}

#[test]
fn cut_detection_requires_jump_and_spacing() {
    let mut stats = FilmStatistics::new(StatsConfig {
        cut_entropy_threshold: 0.9,
        cut_entropy_jump: 0.4,
        cut_history_window: 3,
        ..config(1, 2, 1)
    });

    // Stable wide section through warm-up (warm-up is 4 evaluated frames).
    feed(&mut stats, &[ShotType::Wide; 6]);
    assert!(stats.cuts().is_empty());

    // Shot change: window entropy jumps from 0 to 1 bit.
    stats.add_frame_result(240.0, ClassificationResult::certain(ShotType::Medium));
    assert_eq!(stats.cuts().len(), 1);

    // Another alternation immediately after is inside the spacing window.
    stats.add_frame_result(280.0, ClassificationResult::certain(ShotType::Wide));
    assert_eq!(stats.cuts().len(), 1);
}

#[test]
fn cut_detection_can_be_disabled() {
    let mut stats = FilmStatistics::new(StatsConfig {
        detect_cuts: false,
        cut_entropy_threshold: 0.9,
        cut_entropy_jump: 0.4,
        ..config(1, 2, 1)
    });
    feed(&mut stats, &[ShotType::Wide; 6]);
    stats.add_frame_result(240.0, ClassificationResult::certain(ShotType::Medium));
    assert!(stats.cuts().is_empty());
}

#[test]
fn report_carries_summary_and_series() {
    let mut stats = FilmStatistics::new(config(1, 1, 1));
    feed(
        &mut stats,
        &[
            ShotType::Wide,
            ShotType::Wide,
            ShotType::Medium,
            ShotType::Wide,
        ],
    );

    let report = stats.into_report(Path::new("film.mp4"));
    assert_eq!(report.input, "film.mp4");
    assert_eq!(report.summary.total_frames, 4);
    assert_eq!(report.summary.evaluated_frames, 4);
    assert_eq!(report.summary.shot_counts[&ShotType::Wide], 3);
    assert_eq!(report.summary.dominant_shot_type, Some(ShotType::Wide));
    assert_eq!(report.shot_type_series.len(), 2);
}

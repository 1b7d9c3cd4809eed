// cineshot-core/tests/pipeline_tests.rs
//
// Full pipeline runs over synthetic images: model loading, detection,
// classification, and report assembly through `run_analysis`.

use std::fs;
use std::path::Path;

use cineshot_core::config::CoreConfigBuilder;
use cineshot_core::detection::{
    CascadeModel, DetectionConfig, Stage, WeakClassifier, WeightedRect,
};
use cineshot_core::{run_analysis, CoreConfig, CoreError, ShotType, StatsConfig};
use image::GrayImage;

/// Single-stage cascade that fires when the middle of the window is
/// brighter than its surround.
fn blob_model() -> CascadeModel {
    CascadeModel {
        label: "blob".to_string(),
        window_width: 8,
        window_height: 8,
        stages: vec![Stage {
            threshold: 0.5,
            classifiers: vec![WeakClassifier {
                rects: vec![
                    WeightedRect {
                        x: 0,
                        y: 0,
                        width: 8,
                        height: 8,
                        weight: -1.0,
                    },
                    WeightedRect {
                        x: 2,
                        y: 2,
                        width: 4,
                        height: 4,
                        weight: 4.0,
                    },
                ],
                threshold: 0.1,
                fail_value: -1.0,
                pass_value: 1.0,
            }],
        }],
    }
}

fn write_model(path: &Path) {
    let json = serde_json::to_string_pretty(&blob_model()).unwrap();
    fs::write(path, json).unwrap();
}

/// 64x64 black PNG with a bright 8x8 square at (28, 28).
fn write_blob_png(path: &Path) {
    let img = GrayImage::from_fn(64, 64, |x, y| {
        if (28..36).contains(&x) && (28..36).contains(&y) {
            image::Luma([255u8])
        } else {
            image::Luma([0u8])
        }
    });
    img.save(path).unwrap();
}

fn test_config(input: &Path, model: &Path, output: &Path) -> CoreConfig {
    CoreConfigBuilder::new()
        .input_path(input.to_path_buf())
        .model_path(model.to_path_buf())
        .output_dir(output.to_path_buf())
        .min_neighbors(1)
        .min_size(8)
        .build()
}

#[test]
fn analyzes_a_single_image_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shot.png");
    let model = dir.path().join("blob.json");
    write_blob_png(&input);
    write_model(&model);

    let config = test_config(&input, &model, dir.path());
    let report = run_analysis(&config).unwrap();

    assert_eq!(report.summary.total_frames, 1);
    assert_eq!(report.summary.evaluated_frames, 1);
    assert_eq!(report.input, input.display().to_string());

    // The blob is found and is far too small for a close-up, so the one
    // frame lands on a definite shot type.
    let counted: u64 = report.summary.shot_counts.values().sum();
    assert_eq!(counted, 1);
    assert_eq!(
        report
            .summary
            .shot_counts
            .get(&ShotType::Unknown)
            .copied()
            .unwrap_or(0),
        0
    );
}

#[test]
fn report_exports_from_a_real_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shot.png");
    let model = dir.path().join("blob.json");
    let out = dir.path().join("reports");
    write_blob_png(&input);
    write_model(&model);

    let config = test_config(&input, &model, dir.path());
    let report = run_analysis(&config).unwrap();

    let json_path = dir.path().join("report.json");
    report.write_json(&json_path).unwrap();
    assert!(json_path.is_file());

    let written = report.write_csv_files(&out).unwrap();
    // A single frame never clears warm-up, so only the summary is written.
    assert_eq!(written, vec![out.join("summary.csv")]);
}

#[test]
fn missing_input_fails_before_decoding() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("blob.json");
    write_model(&model);

    let config = test_config(&dir.path().join("absent.png"), &model, dir.path());
    assert!(matches!(
        run_analysis(&config),
        Err(CoreError::InputNotFound(_))
    ));
}

#[test]
fn malformed_model_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shot.png");
    let model = dir.path().join("broken.json");
    write_blob_png(&input);
    fs::write(&model, "{\"label\": \"blob\"").unwrap();

    let config = test_config(&input, &model, dir.path());
    assert!(matches!(run_analysis(&config), Err(CoreError::Model(_))));
}

#[test]
fn stats_config_flows_into_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shot.png");
    let model = dir.path().join("blob.json");
    write_blob_png(&input);
    write_model(&model);

    let mut config = test_config(&input, &model, dir.path());
    config.stats = StatsConfig {
        input_oversample: 5,
        ..StatsConfig::default()
    };
    config.detection = DetectionConfig {
        min_neighbors: 1,
        min_size: 8,
        ..DetectionConfig::default()
    };

    let report = run_analysis(&config).unwrap();
    assert_eq!(report.config.input_oversample, 5);
}

// cineshot-cli/src/commands/analyze.rs
//
// The analyze command: runs the full pipeline over a film or image and
// writes the statistics report into a timestamped run directory.

use std::fs;
use std::time::Instant;

use log::{info, warn};

use cineshot_core::config::CoreConfigBuilder;
use cineshot_core::media::probe::get_video_properties;
use cineshot_core::source::VIDEO_EXTENSIONS;
use cineshot_core::statistics::StatsConfig;
use cineshot_core::{format_duration, run_analysis_with_progress, CoreResult, ShotType};

use crate::cli::AnalyzeArgs;
use crate::logging::get_timestamp;
use crate::output::{create_frame_progress, print_heading, print_info, print_success};

pub fn run_analyze(args: AnalyzeArgs) -> CoreResult<()> {
    let start = Instant::now();

    let run_dir = args.output_dir.join(format!("run_{}", get_timestamp()));

    let stats = StatsConfig {
        input_step: args.step,
        input_oversample: args.oversample,
        entropy_window: args.entropy_window,
        entropy_variance_window: args.entropy_variance_window,
        detect_cuts: !args.no_cut_detection,
        cut_entropy_threshold: args.cut_entropy_threshold,
        cut_entropy_jump: args.cut_entropy_jump,
        ..StatsConfig::default()
    };

    let config = CoreConfigBuilder::new()
        .input_path(args.input.clone())
        .model_path(args.model.clone())
        .output_dir(run_dir.clone())
        .detection(args.detector.into())
        .stats(stats)
        .build();

    print_heading("Cineshot Analysis");
    print_info("Input", args.input.display());
    print_info("Model", args.model.display());
    print_info("Reports", run_dir.display());

    // Size the progress bar from ffprobe when analyzing a video; images and
    // unprobeable inputs fall back to a spinner.
    let total_frames = if is_video(&args.input) {
        match get_video_properties(&args.input) {
            Ok(props) => props.frame_estimate(),
            Err(e) => {
                warn!("could not probe {}: {e}", args.input.display());
                None
            }
        }
    } else {
        None
    };

    let progress = create_frame_progress(total_frames);
    let report = run_analysis_with_progress(&config, &mut |frames| {
        progress.set_position(frames);
    })?;
    progress.finish_and_clear();

    print_heading("Shot Summary");
    print!("{}", report.summary);
    for &cut in &report.cuts {
        info!("cut at {}", cineshot_core::format_timestamp_ms(cut));
    }
    if let Some(dominant) = report.summary.dominant_shot_type {
        if dominant == ShotType::Unknown {
            crate::output::print_warning(
                "most frames were unclassifiable; check the model and detector flags",
            );
        }
    }

    fs::create_dir_all(&run_dir)?;
    report.write_json(&run_dir.join("report.json"))?;
    let written = report.write_csv_files(&run_dir)?;
    info!("wrote {} CSV file(s) to {}", written.len(), run_dir.display());

    print_success(&format!(
        "Analysis finished in {}",
        format_duration(start.elapsed())
    ));
    Ok(())
}

fn is_video(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

// cineshot-cli/src/commands/classify.rs
//
// The classify command: one image through detection and classification,
// with the probabilities printed per shot type.

use cineshot_core::classification::{extract_features, ShotClassifier};
use cineshot_core::detection::{CascadeModel, FeatureDetector};
use cineshot_core::source::{FrameSource, ImageSource};
use cineshot_core::{CoreError, CoreResult, ShotType};

use crate::cli::ClassifyArgs;
use crate::output::{print_heading, print_info};

pub fn run_classify(args: ClassifyArgs) -> CoreResult<()> {
    let model = CascadeModel::from_json_file(&args.model)?;
    let detector = FeatureDetector::new(model, args.detector.into());
    let classifier = ShotClassifier::default();

    let mut source = ImageSource::new(&args.image);
    let frame = source.next_frame()?.ok_or_else(|| {
        CoreError::ImageDecode(format!("no frame in {}", args.image.display()))
    })?;

    let detections = detector.detect(&frame);
    let features = extract_features(&frame, &detections);
    let result = classifier.classify(&features);

    if args.json {
        let doc = serde_json::json!({
            "image": args.image.display().to_string(),
            "predicted": result.predicted,
            "probabilities": result.probabilities,
            "detections": detections,
        });
        let text = serde_json::to_string_pretty(&doc)
            .map_err(|e| CoreError::Export(format!("cannot serialize result: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    print_heading("Shot Classification");
    print_info("Image", args.image.display());
    print_info("Frame", format!("{}x{}", frame.width(), frame.height()));
    print_info("Detections", detections.len());
    for d in &detections {
        println!(
            "  {} at ({}, {}) size {}x{}",
            d.label, d.bounding_box.x, d.bounding_box.y, d.bounding_box.width, d.bounding_box.height
        );
    }

    print_info("Predicted", result.predicted);
    for shot_type in ShotType::ALL {
        let p = result.probabilities.get(&shot_type).copied().unwrap_or(0.0);
        println!("  {:<9} {:>6.1}%", shot_type.to_string(), p * 100.0);
    }
    Ok(())
}

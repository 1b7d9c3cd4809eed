// cineshot-cli/src/commands/eval.rs
//
// The eval command: scores the classifier against a labeled image dataset.

use log::info;

use cineshot_core::classification::ShotClassifier;
use cineshot_core::detection::{CascadeModel, FeatureDetector};
use cineshot_core::{CoreError, CoreResult, DatasetEvaluator};

use crate::cli::EvalArgs;
use crate::output::{print_heading, print_info};

pub fn run_eval(args: EvalArgs) -> CoreResult<()> {
    let model = CascadeModel::from_json_file(&args.model)?;
    let detector = FeatureDetector::new(model, args.detector.into());
    let classifier = ShotClassifier::default();

    let evaluator = DatasetEvaluator::from_ground_truth(&args.ground_truth, &args.dataset)?;
    info!("evaluating {} labeled image(s)", evaluator.entries().len());

    let report = evaluator.evaluate(&detector, &classifier);

    if args.json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CoreError::Export(format!("cannot serialize report: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    print_heading("Dataset Evaluation");
    print_info("Dataset", args.dataset.display());
    print_info("Ground truth", args.ground_truth.display());
    print!("{report}");
    Ok(())
}

// cineshot-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Cineshot: film shot classification and statistics",
    long_about = "Analyzes films or single frames: detects features with a \
                  cascade model, classifies the cinematic shot type of each \
                  frame, and aggregates shot statistics, entropy series, and \
                  cut detection over the whole film."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyzes a film or image and writes a statistics report
    Analyze(AnalyzeArgs),
    /// Classifies the shot type of a single image
    Classify(ClassifyArgs),
    /// Evaluates classification accuracy against a labeled dataset
    Eval(EvalArgs),
    /// Shows media properties of an input file
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Input file to analyze (video or image)
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Cascade model JSON file
    /// Can also be set via the CINESHOT_MODEL environment variable.
    #[arg(short, long, value_name = "MODEL", env = "CINESHOT_MODEL")]
    pub model: PathBuf,

    /// Directory for reports (a timestamped run directory is created inside)
    #[arg(short, long, value_name = "DIR", default_value = "cineshot-reports")]
    pub output_dir: PathBuf,

    // --- Sampling ---
    /// Evaluate every Nth frame
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub step: usize,

    /// Sliding-window size for oversampled (majority) shot types
    #[arg(long, value_name = "FRAMES", default_value_t = 1)]
    pub oversample: usize,

    // --- Entropy windows ---
    /// Window size for shot type entropy over time
    #[arg(long, value_name = "FRAMES", default_value_t = cineshot_core::statistics::DEFAULT_ENTROPY_WINDOW)]
    pub entropy_window: usize,

    /// Window size for entropy variance over time
    #[arg(long, value_name = "FRAMES", default_value_t = cineshot_core::statistics::DEFAULT_ENTROPY_VARIANCE_WINDOW)]
    pub entropy_variance_window: usize,

    // --- Cut detection ---
    /// Disable entropy-based cut detection
    #[arg(long)]
    pub no_cut_detection: bool,

    /// Entropy (bits) above which a frame can be a cut
    #[arg(long, value_name = "BITS", default_value_t = cineshot_core::statistics::DEFAULT_CUT_ENTROPY_THRESHOLD)]
    pub cut_entropy_threshold: f64,

    /// Entropy jump between frames required to confirm a cut
    #[arg(long, value_name = "BITS", default_value_t = cineshot_core::statistics::DEFAULT_CUT_ENTROPY_JUMP)]
    pub cut_entropy_jump: f64,

    // --- Detector tuning ---
    #[command(flatten)]
    pub detector: DetectorArgs,
}

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Image file to classify
    #[arg(required = true, value_name = "IMAGE")]
    pub image: PathBuf,

    /// Cascade model JSON file
    #[arg(short, long, value_name = "MODEL", env = "CINESHOT_MODEL")]
    pub model: PathBuf,

    /// Print the result as JSON instead of styled text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub detector: DetectorArgs,
}

#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Directory containing the dataset images
    #[arg(short, long, value_name = "DIR")]
    pub dataset: PathBuf,

    /// Ground truth CSV (image_path,shot_type per line)
    #[arg(short, long, value_name = "CSV")]
    pub ground_truth: PathBuf,

    /// Cascade model JSON file
    #[arg(short, long, value_name = "MODEL", env = "CINESHOT_MODEL")]
    pub model: PathBuf,

    /// Print the report as JSON instead of styled text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub detector: DetectorArgs,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Media file to inspect
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,
}

/// Detector flags shared by the commands that run detection.
#[derive(Parser, Debug, Clone, Copy)]
pub struct DetectorArgs {
    /// Scale pyramid growth factor (must be above 1.0)
    #[arg(long, value_name = "FACTOR", default_value_t = cineshot_core::detection::DEFAULT_SCALE_FACTOR)]
    pub scale_factor: f64,

    /// Overlapping raw hits required to keep a detection
    #[arg(long, value_name = "COUNT", default_value_t = cineshot_core::detection::DEFAULT_MIN_NEIGHBORS)]
    pub min_neighbors: u32,

    /// Minimum detected feature size in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = cineshot_core::detection::DEFAULT_MIN_SIZE)]
    pub min_size: u32,
}

impl From<DetectorArgs> for cineshot_core::DetectionConfig {
    fn from(args: DetectorArgs) -> Self {
        Self {
            scale_factor: args.scale_factor,
            min_neighbors: args.min_neighbors,
            min_size: args.min_size,
        }
    }
}

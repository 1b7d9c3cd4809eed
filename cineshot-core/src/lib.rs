//! Core library for film shot classification and statistics.
//!
//! This crate analyzes films (or single frames) by detecting features with
//! a multiscale cascade, classifying each frame's cinematic shot type from
//! the detected geometry, and aggregating the per-frame results into
//! film-level statistics: shot distribution, probability and entropy time
//! series, and entropy-based cut detection.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use cineshot_core::config::CoreConfigBuilder;
//! use cineshot_core::processing::run_analysis;
//! use std::path::PathBuf;
//!
//! let config = CoreConfigBuilder::new()
//!     .input_path(PathBuf::from("film.mp4"))
//!     .model_path(PathBuf::from("face.json"))
//!     .output_dir(PathBuf::from("reports"))
//!     .input_step(2)
//!     .oversample(5)
//!     .build();
//!
//! let report = run_analysis(&config).unwrap();
//! println!("{}", report.summary);
//! report.write_json(&PathBuf::from("reports/report.json")).unwrap();
//! ```

pub mod classification;
pub mod config;
pub mod detection;
pub mod error;
pub mod evaluation;
pub mod media;
pub mod processing;
pub mod source;
pub mod statistics;
pub mod utils;

// Re-exports for public API
pub use classification::{
    extract_features, ClassificationResult, ClassifierConfig, ShotClassifier, ShotFeatures,
    ShotType,
};
pub use config::CoreConfig;
pub use detection::{BoundingBox, CascadeModel, DetectedFeature, DetectionConfig, FeatureDetector};
pub use error::{CoreError, CoreResult};
pub use evaluation::{DatasetEvaluator, EvalReport};
pub use media::{Frame, VideoProperties};
pub use processing::{analyze_source, run_analysis, run_analysis_with_progress};
pub use source::{open_source, FrameSource, ImageSource, VideoSource};
pub use statistics::export::FilmReport;
pub use statistics::{FilmStatistics, FilmSummary, StatsConfig};
pub use utils::{format_duration, format_timestamp_ms};

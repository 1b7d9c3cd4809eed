//! Shot feature extraction and shot type classification.

mod classifier;
mod features;

pub use classifier::{
    ClassificationResult, ClassifierConfig, ShotClassifier, ShotType, DEFAULT_CLOSE_UP_RATIO,
    DEFAULT_MEDIUM_RATIO, DEFAULT_MIN_OBJECT_AREA,
};
pub use features::{extract_features, ShotFeatures};

//! Classification accuracy evaluation against a labeled dataset.
//!
//! The ground truth file is a CSV with one `image_path,shot_type` pair per
//! line. Paths are resolved relative to the dataset directory; blank lines
//! and `#` comments are skipped. Every listed image is run through the full
//! detect/extract/classify pipeline and compared against its label.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::classification::{extract_features, ShotClassifier, ShotType};
use crate::detection::FeatureDetector;
use crate::error::{CoreError, CoreResult};
use crate::source::{FrameSource, ImageSource};

/// A single labeled dataset entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruthEntry {
    pub image: PathBuf,
    pub expected: ShotType,
}

/// Result of evaluating a classifier on a labeled dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub total: usize,
    pub correct: usize,
    /// Fraction of correctly classified images, in 0..=1
    pub accuracy: f64,
    /// confusion\[expected\]\[predicted\] = count
    pub confusion: BTreeMap<ShotType, BTreeMap<ShotType, u64>>,
}

impl std::fmt::Display for EvalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Accuracy: {}/{} ({:.1}%)",
            self.correct,
            self.total,
            self.accuracy * 100.0
        )?;
        for (expected, row) in &self.confusion {
            for (predicted, count) in row {
                if *count > 0 {
                    writeln!(f, "  {expected} -> {predicted}: {count}")?;
                }
            }
        }
        Ok(())
    }
}

/// Evaluates classification accuracy against a labeled test dataset.
pub struct DatasetEvaluator {
    entries: Vec<GroundTruthEntry>,
}

impl DatasetEvaluator {
    /// Loads ground truth labels from a CSV file, resolving image paths
    /// against `dataset_dir`.
    pub fn from_ground_truth(csv_path: &Path, dataset_dir: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(csv_path).map_err(|e| {
            CoreError::GroundTruth(format!("cannot read {}: {e}", csv_path.display()))
        })?;

        let mut entries = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (path_part, label_part) = line.rsplit_once(',').ok_or_else(|| {
                CoreError::GroundTruth(format!(
                    "{}:{}: expected 'image_path,shot_type'",
                    csv_path.display(),
                    line_no + 1
                ))
            })?;
            let expected: ShotType = label_part.parse().map_err(|_| {
                CoreError::GroundTruth(format!(
                    "{}:{}: unknown shot type '{}'",
                    csv_path.display(),
                    line_no + 1,
                    label_part.trim()
                ))
            })?;
            entries.push(GroundTruthEntry {
                image: dataset_dir.join(path_part.trim()),
                expected,
            });
        }

        if entries.is_empty() {
            return Err(CoreError::GroundTruth(format!(
                "no usable entries in {}",
                csv_path.display()
            )));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[GroundTruthEntry] {
        &self.entries
    }

    /// Runs the pipeline on every dataset image and scores the predictions.
    ///
    /// Images that fail to load are counted as incorrect and logged, so a
    /// single broken file does not abort a long evaluation.
    pub fn evaluate(
        &self,
        detector: &FeatureDetector,
        classifier: &ShotClassifier,
    ) -> EvalReport {
        let mut correct = 0;
        let mut confusion: BTreeMap<ShotType, BTreeMap<ShotType, u64>> = BTreeMap::new();

        for entry in &self.entries {
            let predicted = match classify_image(&entry.image, detector, classifier) {
                Ok(predicted) => predicted,
                Err(e) => {
                    warn!("skipping {}: {e}", entry.image.display());
                    ShotType::Unknown
                }
            };

            debug!(
                "{}: expected {}, predicted {}",
                entry.image.display(),
                entry.expected,
                predicted
            );

            if predicted == entry.expected {
                correct += 1;
            }
            *confusion
                .entry(entry.expected)
                .or_default()
                .entry(predicted)
                .or_insert(0) += 1;
        }

        let total = self.entries.len();
        EvalReport {
            total,
            correct,
            accuracy: if total > 0 {
                correct as f64 / total as f64
            } else {
                0.0
            },
            confusion,
        }
    }
}

fn classify_image(
    path: &Path,
    detector: &FeatureDetector,
    classifier: &ShotClassifier,
) -> CoreResult<ShotType> {
    let mut source = ImageSource::new(path);
    let frame = source
        .next_frame()?
        .ok_or_else(|| CoreError::ImageDecode(format!("no frame in {}", path.display())))?;
    let detections = detector.detect(&frame);
    let features = extract_features(&frame, &detections);
    Ok(classifier.classify(&features).predicted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ground_truth_with_comments() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("gt.csv");
        fs::write(
            &csv,
            "# dataset v1\nshots/a.png,wide\n\nshots/b.png,close-up\n",
        )
        .unwrap();

        let evaluator = DatasetEvaluator::from_ground_truth(&csv, dir.path()).unwrap();
        assert_eq!(evaluator.entries().len(), 2);
        assert_eq!(evaluator.entries()[0].expected, ShotType::Wide);
        assert_eq!(evaluator.entries()[1].expected, ShotType::CloseUp);
        assert_eq!(evaluator.entries()[1].image, dir.path().join("shots/b.png"));
    }

    #[test]
    fn rejects_bad_labels_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.csv");
        fs::write(&bad, "a.png,blurry\n").unwrap();
        assert!(matches!(
            DatasetEvaluator::from_ground_truth(&bad, dir.path()),
            Err(CoreError::GroundTruth(_))
        ));

        let empty = dir.path().join("empty.csv");
        fs::write(&empty, "# nothing here\n").unwrap();
        assert!(DatasetEvaluator::from_ground_truth(&empty, dir.path()).is_err());
    }
}

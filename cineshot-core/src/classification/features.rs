//! Geometric shot features derived from detections.
//!
//! The extractor reduces a frame's detections to the area and position
//! statistics the classifier works with. It is stateless and reusable
//! across frames.

use serde::Serialize;

use crate::detection::DetectedFeature;
use crate::media::Frame;

/// Extracted geometric and area-based properties of a single frame.
///
/// `object_centers` and `object_areas` are ordered by object size, largest
/// first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShotFeatures {
    /// Number of detected objects in the frame
    pub object_count: usize,

    /// Area of the largest object detected
    pub largest_object_area: f64,
    /// Sum of all object areas
    pub total_object_area: f64,
    /// Total area of the frame (width * height)
    pub total_area: f64,

    /// Center points of detected objects, ordered by size
    pub object_centers: Vec<(f32, f32)>,
    /// Areas of detected objects, ordered by size
    pub object_areas: Vec<f64>,
}

impl ShotFeatures {
    /// Ratio of the largest object to the frame area, in 0..=1.
    pub fn largest_area_ratio(&self) -> f64 {
        if self.total_area > 0.0 {
            self.largest_object_area / self.total_area
        } else {
            0.0
        }
    }

    /// Area of the smallest detected object, if any.
    pub fn smallest_object_area(&self) -> Option<f64> {
        self.object_areas.last().copied()
    }
}

/// Extracts shot-level features from a frame and its detections.
///
/// Detections are re-sorted by area so the ordering contract holds even for
/// hand-built inputs.
pub fn extract_features(frame: &Frame, detections: &[DetectedFeature]) -> ShotFeatures {
    let mut sized: Vec<(f64, (f32, f32))> = detections
        .iter()
        .map(|d| (d.bounding_box.area(), d.bounding_box.center()))
        .collect();
    sized.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    ShotFeatures {
        object_count: sized.len(),
        largest_object_area: sized.first().map_or(0.0, |s| s.0),
        total_object_area: sized.iter().map(|s| s.0).sum(),
        total_area: frame.area(),
        object_centers: sized.iter().map(|s| s.1).collect(),
        object_areas: sized.iter().map(|s| s.0).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;

    fn feature(x: u32, y: u32, w: u32, h: u32) -> DetectedFeature {
        DetectedFeature {
            label: "face".to_string(),
            bounding_box: BoundingBox {
                x,
                y,
                width: w,
                height: h,
            },
        }
    }

    #[test]
    fn empty_frame_has_zero_features() {
        let frame = Frame::from_luma(10, 10, vec![0; 100], 0.0);
        let features = extract_features(&frame, &[]);

        assert_eq!(features.object_count, 0);
        assert_eq!(features.largest_object_area, 0.0);
        assert_eq!(features.total_object_area, 0.0);
        assert_eq!(features.total_area, 100.0);
        assert!(features.object_centers.is_empty());
        assert_eq!(features.smallest_object_area(), None);
    }

    #[test]
    fn orders_objects_largest_first() {
        let frame = Frame::from_luma(100, 100, vec![0; 10_000], 0.0);
        // Deliberately unsorted input.
        let detections = vec![
            feature(0, 0, 10, 10),
            feature(50, 50, 30, 30),
            feature(20, 20, 20, 20),
        ];

        let features = extract_features(&frame, &detections);
        assert_eq!(features.object_count, 3);
        assert_eq!(features.largest_object_area, 900.0);
        assert_eq!(features.total_object_area, 900.0 + 400.0 + 100.0);
        assert_eq!(features.object_areas, vec![900.0, 400.0, 100.0]);
        assert_eq!(features.object_centers[0], (65.0, 65.0));
        assert_eq!(features.smallest_object_area(), Some(100.0));
    }

    #[test]
    fn largest_area_ratio() {
        let frame = Frame::from_luma(100, 100, vec![0; 10_000], 0.0);
        let features = extract_features(&frame, &[feature(0, 0, 50, 20)]);
        assert_eq!(features.largest_area_ratio(), 0.1);
    }
}

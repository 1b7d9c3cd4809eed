//! Multiscale cascade feature detection.
//!
//! This module finds labeled features (typically faces) in a grayscale
//! frame. A serde-loaded cascade model is slid across the frame at a
//! pyramid of scales; raw hits are then merged by rectangle similarity with
//! a minimum-neighbor vote, and the surviving detections are returned
//! sorted largest-first so downstream feature extraction can rely on that
//! ordering.

mod cascade;
mod integral;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::media::Frame;

pub use cascade::{CascadeModel, Stage, WeakClassifier, WeightedRect};
pub use integral::IntegralImage;

/// Default multiscale pyramid growth factor.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;

/// Default number of overlapping raw hits required to keep a detection.
pub const DEFAULT_MIN_NEIGHBORS: u32 = 3;

/// Default minimum feature size in pixels (applies to both dimensions).
pub const DEFAULT_MIN_SIZE: u32 = 30;

/// Axis-aligned bounding box in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    /// Center point of the box.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// A single detected feature with its class label and location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedFeature {
    /// Type or name of the detected object (e.g., "face")
    pub label: String,
    /// Bounding box of the detected object in frame coordinates
    pub bounding_box: BoundingBox,
}

/// Tuning parameters for multiscale detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Scale pyramid growth factor per level (must be > 1.0)
    pub scale_factor: f64,
    /// Minimum overlapping raw hits per kept detection (0 = keep raw hits)
    pub min_neighbors: u32,
    /// Minimum detected feature edge length in pixels
    pub min_size: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

/// Detects visual features in a frame using a cascade model.
pub struct FeatureDetector {
    model: CascadeModel,
    config: DetectionConfig,
}

impl FeatureDetector {
    pub fn new(model: CascadeModel, config: DetectionConfig) -> Self {
        Self { model, config }
    }

    /// Label produced by the loaded model.
    pub fn label(&self) -> &str {
        &self.model.label
    }

    /// Runs multiscale detection over the frame.
    ///
    /// Returns grouped detections sorted by bounding box area, largest
    /// first.
    pub fn detect(&self, frame: &Frame) -> Vec<DetectedFeature> {
        let integral = IntegralImage::new(frame);
        let scales = self.build_scales(frame.width(), frame.height());

        let raw_hits: Vec<BoundingBox> = scales
            .par_iter()
            .flat_map_iter(|&scale| self.scan_scale(&integral, scale))
            .collect();

        debug!(
            "Cascade '{}' produced {} raw hits over {} scales",
            self.model.label,
            raw_hits.len(),
            scales.len()
        );

        let mut grouped = group_rectangles(&raw_hits, self.config.min_neighbors);
        grouped.sort_by(|a, b| {
            b.area()
                .partial_cmp(&a.area())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        grouped
            .into_iter()
            .map(|bounding_box| DetectedFeature {
                label: self.model.label.clone(),
                bounding_box,
            })
            .collect()
    }

    /// Scale levels at which the base window fits the frame and the scaled
    /// window is at least `min_size` on both edges.
    fn build_scales(&self, frame_width: u32, frame_height: u32) -> Vec<f64> {
        let mut scales = Vec::new();
        let mut scale = 1.0;
        loop {
            let sw = (f64::from(self.model.window_width) * scale).round() as u32;
            let sh = (f64::from(self.model.window_height) * scale).round() as u32;
            if sw > frame_width || sh > frame_height {
                break;
            }
            if sw >= self.config.min_size && sh >= self.config.min_size {
                scales.push(scale);
            }
            scale *= self.config.scale_factor;
        }
        scales
    }

    /// Slides the scaled window over the whole frame at one scale level.
    fn scan_scale(&self, integral: &IntegralImage, scale: f64) -> Vec<BoundingBox> {
        let sw = (f64::from(self.model.window_width) * scale).round() as u32;
        let sh = (f64::from(self.model.window_height) * scale).round() as u32;
        let step = (sw / 10).clamp(2, 8);

        let mut hits = Vec::new();
        let mut y = 0;
        while y + sh <= integral.height() {
            let mut x = 0;
            while x + sw <= integral.width() {
                if self.model.evaluate_window(integral, x, y, scale) {
                    hits.push(BoundingBox {
                        x,
                        y,
                        width: sw,
                        height: sh,
                    });
                }
                x += step;
            }
            y += step;
        }
        hits
    }
}

/// Merges overlapping raw hits into averaged detections.
///
/// Rectangles are clustered by positional similarity (union-find over a
/// pairwise similarity predicate); each cluster with at least
/// `min_neighbors` members is collapsed into its average rectangle. With
/// `min_neighbors == 0` the raw hits are returned untouched.
pub fn group_rectangles(rects: &[BoundingBox], min_neighbors: u32) -> Vec<BoundingBox> {
    if min_neighbors == 0 || rects.is_empty() {
        return rects.to_vec();
    }

    let mut parent: Vec<usize> = (0..rects.len()).collect();

    fn find(parent: &mut [usize], i: usize) -> usize {
        let mut root = i;
        while parent[root] != root {
            root = parent[root];
        }
        let mut cur = i;
        while parent[cur] != root {
            let next = parent[cur];
            parent[cur] = root;
            cur = next;
        }
        root
    }

    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if similar_rects(&rects[i], &rects[j]) {
                let ri = find(&mut parent, i);
                let rj = find(&mut parent, j);
                if ri != rj {
                    parent[ri] = rj;
                }
            }
        }
    }

    // Accumulate cluster sums keyed by root index.
    let mut sums: std::collections::HashMap<usize, (u64, u64, u64, u64, u64)> =
        std::collections::HashMap::new();
    for i in 0..rects.len() {
        let root = find(&mut parent, i);
        let entry = sums.entry(root).or_default();
        entry.0 += u64::from(rects[i].x);
        entry.1 += u64::from(rects[i].y);
        entry.2 += u64::from(rects[i].width);
        entry.3 += u64::from(rects[i].height);
        entry.4 += 1;
    }

    let mut grouped: Vec<BoundingBox> = sums
        .values()
        .filter(|&&(_, _, _, _, count)| count >= u64::from(min_neighbors))
        .map(|&(x, y, w, h, count)| BoundingBox {
            x: (x / count) as u32,
            y: (y / count) as u32,
            width: (w / count) as u32,
            height: (h / count) as u32,
        })
        .collect();

    // Deterministic output order regardless of hash iteration.
    grouped.sort_by_key(|r| (r.x, r.y, r.width, r.height));
    grouped
}

/// Positional similarity predicate, matching the usual grouping tolerance
/// of 20% of the smaller rectangle's size.
fn similar_rects(a: &BoundingBox, b: &BoundingBox) -> bool {
    let delta = 0.2 * 0.5 * f64::from(a.width.min(b.width) + a.height.min(b.height));
    let close = |p: u32, q: u32| (f64::from(p) - f64::from(q)).abs() <= delta;

    close(a.x, b.x)
        && close(a.y, b.y)
        && close(a.x + a.width, b.x + b.width)
        && close(a.y + a.height, b.y + b.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Frame;

    fn blob_frame(size: u32, blob_x: u32, blob_y: u32, blob_size: u32) -> Frame {
        let mut data = vec![0u8; (size * size) as usize];
        for y in blob_y..blob_y + blob_size {
            for x in blob_x..blob_x + blob_size {
                data[(y * size + x) as usize] = 255;
            }
        }
        Frame::from_luma(size, size, data, 0.0)
    }

    fn blob_detector(min_neighbors: u32) -> FeatureDetector {
        FeatureDetector::new(
            cascade::tests::center_surround_model(),
            DetectionConfig {
                scale_factor: 1.1,
                min_neighbors,
                min_size: 8,
            },
        )
    }

    #[test]
    fn detects_bright_blob() {
        let frame = blob_frame(64, 28, 28, 8);
        let detector = blob_detector(1);

        let detections = detector.detect(&frame);
        assert!(!detections.is_empty(), "expected at least one detection");
        assert!(
            detections.iter().any(|d| d.bounding_box.contains(32, 32)),
            "no detection covers the blob center: {detections:?}"
        );
        assert!(detections.iter().all(|d| d.label == "blob"));
    }

    #[test]
    fn empty_on_flat_frames() {
        let frame = Frame::from_luma(64, 64, vec![128u8; 64 * 64], 0.0);
        let detector = blob_detector(1);
        assert!(detector.detect(&frame).is_empty());
    }

    #[test]
    fn detections_are_sorted_largest_first() {
        let detector = blob_detector(0);
        // Two blobs of different size.
        let mut data = vec![0u8; 128 * 128];
        for (cx, cy, half) in [(32u32, 32u32, 4u32), (88, 88, 8)] {
            for y in cy - half..cy + half {
                for x in cx - half..cx + half {
                    data[(y * 128 + x) as usize] = 255;
                }
            }
        }
        let frame = Frame::from_luma(128, 128, data, 0.0);

        let detections = detector.detect(&frame);
        for pair in detections.windows(2) {
            assert!(pair[0].bounding_box.area() >= pair[1].bounding_box.area());
        }
    }

    #[test]
    fn grouping_requires_min_neighbors() {
        let cluster = vec![
            BoundingBox { x: 10, y: 10, width: 20, height: 20 },
            BoundingBox { x: 11, y: 10, width: 20, height: 20 },
            BoundingBox { x: 10, y: 11, width: 21, height: 20 },
        ];
        let lone = BoundingBox { x: 100, y: 100, width: 20, height: 20 };

        let mut rects = cluster.clone();
        rects.push(lone);

        let grouped = group_rectangles(&rects, 3);
        assert_eq!(grouped.len(), 1);
        let kept = grouped[0];
        assert!(kept.x >= 10 && kept.x <= 11);
        assert_eq!(kept.width, 20);

        // Without a neighbor requirement everything survives.
        assert_eq!(group_rectangles(&rects, 0).len(), 4);
    }

    #[test]
    fn bounding_box_geometry() {
        let b = BoundingBox { x: 10, y: 20, width: 30, height: 40 };
        assert_eq!(b.area(), 1200.0);
        assert_eq!(b.center(), (25.0, 40.0));
        assert!(b.contains(10, 20));
        assert!(!b.contains(40, 20));
    }
}

//! Summed-area tables for constant-time window sums.
//!
//! The detector needs both plain and squared sums: the plain table drives
//! the Haar-style rectangle features, the squared table supplies the
//! per-window variance used to normalize feature thresholds.

use crate::media::Frame;

/// Integral image over a grayscale frame.
///
/// Tables are `(width + 1) * (height + 1)` with a zero border row/column so
/// the four-corner lookup needs no edge cases.
pub struct IntegralImage {
    width: u32,
    height: u32,
    sums: Vec<u64>,
    squared_sums: Vec<u64>,
}

impl IntegralImage {
    pub fn new(frame: &Frame) -> Self {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let stride = width + 1;

        let mut sums = vec![0u64; stride * (height + 1)];
        let mut squared_sums = vec![0u64; stride * (height + 1)];

        for y in 0..height {
            let mut row_sum = 0u64;
            let mut row_sq_sum = 0u64;
            for x in 0..width {
                let v = u64::from(frame.data()[y * width + x]);
                row_sum += v;
                row_sq_sum += v * v;

                let idx = (y + 1) * stride + (x + 1);
                sums[idx] = sums[y * stride + (x + 1)] + row_sum;
                squared_sums[idx] = squared_sums[y * stride + (x + 1)] + row_sq_sum;
            }
        }

        Self {
            width: frame.width(),
            height: frame.height(),
            sums,
            squared_sums,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sum of pixel values inside the rectangle. Coordinates beyond the
    /// image edge are clamped, so slight rounding overshoot from scaled
    /// feature rectangles is harmless.
    pub fn rect_sum(&self, x: u32, y: u32, w: u32, h: u32) -> u64 {
        self.lookup(&self.sums, x, y, w, h)
    }

    /// Sum of squared pixel values inside the rectangle.
    pub fn rect_squared_sum(&self, x: u32, y: u32, w: u32, h: u32) -> u64 {
        self.lookup(&self.squared_sums, x, y, w, h)
    }

    fn lookup(&self, table: &[u64], x: u32, y: u32, w: u32, h: u32) -> u64 {
        let stride = self.width as usize + 1;
        let x0 = x.min(self.width) as usize;
        let y0 = y.min(self.height) as usize;
        let x1 = x.saturating_add(w).min(self.width) as usize;
        let y1 = y.saturating_add(h).min(self.height) as usize;

        table[y1 * stride + x1] + table[y0 * stride + x0]
            - table[y0 * stride + x1]
            - table[y1 * stride + x0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Frame;

    fn gradient_frame() -> Frame {
        // 4x3 frame with pixel value x + y.
        let mut data = Vec::new();
        for y in 0..3u8 {
            for x in 0..4u8 {
                data.push(x + y);
            }
        }
        Frame::from_luma(4, 3, data, 0.0)
    }

    #[test]
    fn full_frame_sum_matches_naive() {
        let frame = gradient_frame();
        let integral = IntegralImage::new(&frame);

        let naive: u64 = frame.data().iter().map(|&v| u64::from(v)).sum();
        assert_eq!(integral.rect_sum(0, 0, 4, 3), naive);

        let naive_sq: u64 = frame
            .data()
            .iter()
            .map(|&v| u64::from(v) * u64::from(v))
            .sum();
        assert_eq!(integral.rect_squared_sum(0, 0, 4, 3), naive_sq);
    }

    #[test]
    fn inner_rect_sum_matches_naive() {
        let frame = gradient_frame();
        let integral = IntegralImage::new(&frame);

        // Rectangle (1,1) 2x2 covers values 2,3,3,4.
        assert_eq!(integral.rect_sum(1, 1, 2, 2), 12);
        assert_eq!(integral.rect_squared_sum(1, 1, 2, 2), 4 + 9 + 9 + 16);
    }

    #[test]
    fn out_of_bounds_rects_are_clamped() {
        let frame = gradient_frame();
        let integral = IntegralImage::new(&frame);

        assert_eq!(
            integral.rect_sum(2, 1, 100, 100),
            integral.rect_sum(2, 1, 2, 2)
        );
        assert_eq!(integral.rect_sum(10, 10, 4, 4), 0);
    }
}

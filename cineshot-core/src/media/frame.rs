//! Grayscale frame representation shared by all input sources.
//!
//! Every source (still image or video) yields `Frame` values, so the rest of
//! the pipeline never deals with packed pixel formats. Conversion to 8-bit
//! luma happens here, which replaces the original preprocessing step.

use image::GrayImage;

/// An 8-bit grayscale frame with a presentation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    /// Row-major luma plane, `width * height` bytes.
    data: Vec<u8>,
    /// Presentation timestamp in milliseconds (0 for still images).
    timestamp_ms: f64,
}

impl Frame {
    /// Creates a frame from a raw luma plane.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height`. Callers construct the plane
    /// themselves, so a mismatch is a programming error.
    pub fn from_luma(width: u32, height: u32, data: Vec<u8>, timestamp_ms: f64) -> Self {
        assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "luma plane size does not match frame dimensions"
        );
        Self {
            width,
            height,
            data,
            timestamp_ms,
        }
    }

    /// Creates a frame from packed RGB24 data (the ffmpeg rawvideo default).
    ///
    /// Uses the integer BT.601 luma approximation: `y = (77r + 150g + 29b) >> 8`.
    pub fn from_rgb24(width: u32, height: u32, rgb: &[u8], timestamp_ms: f64) -> Self {
        let pixels = (width as usize) * (height as usize);
        debug_assert!(rgb.len() >= pixels * 3);

        let mut data = Vec::with_capacity(pixels);
        for chunk in rgb.chunks_exact(3).take(pixels) {
            let r = u32::from(chunk[0]);
            let g = u32::from(chunk[1]);
            let b = u32::from(chunk[2]);
            data.push(((77 * r + 150 * g + 29 * b) >> 8) as u8);
        }
        Self::from_luma(width, height, data, timestamp_ms)
    }

    /// Creates a frame from a decoded grayscale image.
    pub fn from_gray_image(img: &GrayImage, timestamp_ms: f64) -> Self {
        Self::from_luma(img.width(), img.height(), img.as_raw().clone(), timestamp_ms)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total frame area in pixels.
    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }

    /// Luma value at (x, y). Caller guarantees the coordinates are in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// The raw luma plane, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

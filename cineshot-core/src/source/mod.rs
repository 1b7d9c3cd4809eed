//! Input sources that turn files into a stream of grayscale frames.
//!
//! A single trait covers both still images and videos so the analysis
//! pipeline can treat them uniformly. `open_source` picks the right
//! implementation from the file extension.

mod video;

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{CoreError, CoreResult};
use crate::media::Frame;

pub use video::VideoSource;

/// File extensions treated as still images (case-insensitive).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// File extensions treated as videos (case-insensitive).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "m4v", "mpg", "mpeg"];

/// A pull-based supplier of timestamped grayscale frames.
///
/// `next_frame` returns `Ok(None)` once the source is exhausted. Decode
/// failures are reported as errors rather than silently ending the stream.
pub trait FrameSource {
    /// Returns the next frame, or `None` when no frames remain.
    fn next_frame(&mut self) -> CoreResult<Option<Frame>>;

    /// Path of the underlying file, for logging and reports.
    fn path(&self) -> &Path;
}

/// A single still image exposed as a one-frame source.
///
/// The image is decoded lazily on the first `next_frame` call; subsequent
/// calls yield `None`.
pub struct ImageSource {
    path: PathBuf,
    delivered: bool,
}

impl ImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delivered: false,
        }
    }
}

impl FrameSource for ImageSource {
    fn next_frame(&mut self) -> CoreResult<Option<Frame>> {
        if self.delivered {
            return Ok(None);
        }
        self.delivered = true;

        let img = image::open(&self.path).map_err(|e| {
            CoreError::ImageDecode(format!("failed to load {}: {e}", self.path.display()))
        })?;
        let gray = img.to_luma8();
        debug!(
            "Loaded image {} ({}x{})",
            self.path.display(),
            gray.width(),
            gray.height()
        );

        // Still images carry no timestamp.
        Ok(Some(Frame::from_gray_image(&gray, 0.0)))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Opens the appropriate source for `path` based on its extension.
pub fn open_source(path: &Path) -> CoreResult<Box<dyn FrameSource>> {
    if !path.is_file() {
        return Err(CoreError::InputNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(Box::new(ImageSource::new(path)))
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Ok(Box::new(VideoSource::open(path)?))
    } else {
        Err(CoreError::UnsupportedInput(path.to_path_buf()))
    }
}

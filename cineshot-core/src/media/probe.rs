//! Media metadata via the `ffprobe` crate.
//!
//! Used by the CLI `info` command and to size progress reporting before a
//! video analysis run.

use std::path::Path;

use ffprobe::ffprobe;

use crate::error::{CoreError, CoreResult};

/// Video metadata including resolution, duration, and frame rate.
#[derive(Debug, Clone, Default)]
pub struct VideoProperties {
    /// Width of the video in pixels
    pub width: u32,

    /// Height of the video in pixels
    pub height: u32,

    /// Duration of the video in seconds, when the container reports one
    pub duration_secs: Option<f64>,

    /// Average frame rate in frames per second
    pub fps: Option<f64>,

    /// Codec name of the primary video stream (e.g., "h264")
    pub codec: Option<String>,
}

impl VideoProperties {
    /// Estimated total frame count, when both duration and fps are known.
    pub fn frame_estimate(&self) -> Option<u64> {
        match (self.duration_secs, self.fps) {
            (Some(duration), Some(fps)) if duration > 0.0 && fps > 0.0 => {
                Some((duration * fps).round() as u64)
            }
            _ => None,
        }
    }
}

/// Gets video properties for a given input file.
pub fn get_video_properties(input_path: &Path) -> CoreResult<VideoProperties> {
    log::debug!(
        "Running ffprobe (via crate) for video properties on: {}",
        input_path.display()
    );

    let metadata = ffprobe(input_path)
        .map_err(|e| CoreError::Probe(format!("ffprobe failed for {}: {e:?}", input_path.display())))?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::Probe(format!("No video stream found in {}", input_path.display()))
        })?;

    let width = video_stream.width.unwrap_or(0) as u32;
    let height = video_stream.height.unwrap_or(0) as u32;
    if width == 0 || height == 0 {
        return Err(CoreError::Probe(format!(
            "Could not determine dimensions of {}",
            input_path.display()
        )));
    }

    // Stream duration is preferred; the container-level value is the fallback.
    let duration_secs = video_stream
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .or_else(|| {
            metadata
                .format
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok())
        });

    Ok(VideoProperties {
        width,
        height,
        duration_secs,
        fps: parse_frame_rate(&video_stream.avg_frame_rate)
            .or_else(|| parse_frame_rate(&video_stream.r_frame_rate)),
        codec: video_stream.codec_name.clone(),
    })
}

/// Parses an ffprobe rational frame rate such as "24000/1001".
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let mut parts = rate.splitn(2, '/');
    let num: f64 = parts.next()?.trim().parse().ok()?;
    let den: f64 = match parts.next() {
        Some(d) => d.trim().parse().ok()?,
        None => 1.0,
    };
    if den == 0.0 || num <= 0.0 {
        return None;
    }
    Some(num / den)
}

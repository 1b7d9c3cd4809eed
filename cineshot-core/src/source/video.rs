//! Video frame decoding through ffmpeg-sidecar.
//!
//! Frames are piped out of an ffmpeg child process as raw RGB24 and
//! converted to luma on the way in. The decoder-reported timestamp is kept
//! so the statistics layer can build time series.

use std::path::{Path, PathBuf};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use ffmpeg_sidecar::iter::FfmpegIterator;
use log::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::media::Frame;
use crate::source::FrameSource;

/// Streams decoded frames from a video file.
pub struct VideoSource {
    path: PathBuf,
    child: FfmpegChild,
    events: FfmpegIterator,
    frames_decoded: u64,
    finished: bool,
}

impl VideoSource {
    /// Spawns an ffmpeg process decoding `path` to raw RGB24 frames.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let mut cmd = FfmpegCommand::new();
        cmd.hide_banner()
            .input(path.to_string_lossy().as_ref())
            .args(["-map", "0:v:0"])
            .rawvideo();

        debug!("Spawning ffmpeg decoder for {}", path.display());

        let mut child = cmd.spawn().map_err(|e| {
            CoreError::VideoDecode(format!(
                "failed to start ffmpeg for {}: {e}",
                path.display()
            ))
        })?;

        let events = child.iter().map_err(|e| {
            CoreError::VideoDecode(format!(
                "failed to read ffmpeg output for {}: {e}",
                path.display()
            ))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            child,
            events,
            frames_decoded: 0,
            finished: false,
        })
    }

    /// Number of frames decoded so far.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> CoreResult<Option<Frame>> {
        if self.finished {
            return Ok(None);
        }

        for event in self.events.by_ref() {
            match event {
                FfmpegEvent::OutputFrame(raw) => {
                    self.frames_decoded += 1;
                    let timestamp_ms = f64::from(raw.timestamp) * 1000.0;
                    return Ok(Some(Frame::from_rgb24(
                        raw.width,
                        raw.height,
                        &raw.data,
                        timestamp_ms,
                    )));
                }
                FfmpegEvent::Error(message) => {
                    self.finished = true;
                    return Err(CoreError::VideoDecode(format!(
                        "ffmpeg error while decoding {}: {message}",
                        self.path.display()
                    )));
                }
                FfmpegEvent::Log(LogLevel::Warning | LogLevel::Error | LogLevel::Fatal, message) => {
                    // Surface unusual decoder chatter without failing the run;
                    // hard failures arrive as FfmpegEvent::Error.
                    warn!("ffmpeg: {message}");
                }
                FfmpegEvent::Done => break,
                _ => {}
            }
        }

        self.finished = true;
        debug!(
            "Decoder for {} finished after {} frames",
            self.path.display(),
            self.frames_decoded
        );

        if self.frames_decoded == 0 {
            return Err(CoreError::VideoDecode(format!(
                "no frames decoded from {}",
                self.path.display()
            )));
        }
        Ok(None)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        // Make sure an abandoned decoder does not keep running.
        if !self.finished {
            let _ = self.child.kill();
        }
    }
}

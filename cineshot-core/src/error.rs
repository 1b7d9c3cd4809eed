//! Error types for the cineshot-core library.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for cineshot
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Unsupported input format: {0}")]
    UnsupportedInput(PathBuf),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Video decode error: {0}")]
    VideoDecode(String),

    #[error("Media probe error: {0}")]
    Probe(String),

    #[error("Cascade model error: {0}")]
    Model(String),

    #[error("Ground truth error: {0}")]
    GroundTruth(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unexpected error: {0}")]
    Other(String),
}

/// Result type for cineshot operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

//! Media primitives: grayscale frames and ffprobe-backed metadata.

mod frame;
pub mod probe;

pub use frame::Frame;
pub use probe::VideoProperties;

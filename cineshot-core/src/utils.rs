//! Small formatting helpers shared by the library and the CLI.

use std::time::Duration;

/// Formats a duration as "XhYmZs".
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

/// Formats a millisecond timestamp as "HH:MM:SS.mmm".
pub fn format_timestamp_ms(timestamp_ms: f64) -> String {
    let clamped = timestamp_ms.max(0.0);
    let total_ms = clamped.round() as u64;
    let ms = total_ms % 1000;
    let total_seconds = total_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{ms:03}")
}

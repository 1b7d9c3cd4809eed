// cineshot-cli/src/output.rs
//
// Terminal output helpers. Styled text goes through `console` so color
// support detection and NO_COLOR handling come for free.

use std::fmt::Display;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a heading with clear separation.
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("\n{}", style(&line).cyan());
    println!("{}", style(text).bold());
    println!("{}", style(&line).cyan());
}

/// Print a section heading (smaller than a main heading).
pub fn print_section(text: &str) {
    println!("\n{}", style(text).bold());
    println!("{}", style("-".repeat(40)).cyan());
}

/// Print an info line with a styled label.
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{} {}", style(format!("{label}:")).cyan(), value);
}

pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), style(message).yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Progress bar for frame-by-frame analysis. When the total frame count is
/// unknown (images, streams ffprobe cannot size) a spinner is used instead.
pub fn create_frame_progress(total_frames: Option<u64>) -> ProgressBar {
    let pb = match total_frames {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} {pos} frames analyzed")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        }
    };
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

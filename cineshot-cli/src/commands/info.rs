// cineshot-cli/src/commands/info.rs
//
// The info command: ffprobe-backed media properties for an input file.

use cineshot_core::media::probe::get_video_properties;
use cineshot_core::source::{FrameSource, ImageSource, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use cineshot_core::{format_duration, CoreError, CoreResult};
use std::time::Duration;

use crate::cli::InfoArgs;
use crate::output::{print_heading, print_info};

pub fn run_info(args: InfoArgs) -> CoreResult<()> {
    if !args.input.is_file() {
        return Err(CoreError::InputNotFound(args.input.clone()));
    }

    print_heading("Media Information");
    print_info("File", args.input.display());

    let ext = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        let (width, height) = image_dimensions(&args.input)?;
        print_info("Kind", "image");
        print_info("Resolution", format!("{width}x{height}"));
        return Ok(());
    }

    if !VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::UnsupportedInput(args.input.clone()));
    }

    let props = get_video_properties(&args.input)?;
    print_info("Kind", "video");
    print_info("Resolution", format!("{}x{}", props.width, props.height));
    if let Some(codec) = &props.codec {
        print_info("Codec", codec);
    }
    if let Some(fps) = props.fps {
        print_info("Frame rate", format!("{fps:.3} fps"));
    }
    if let Some(duration) = props.duration_secs {
        print_info(
            "Duration",
            format_duration(Duration::from_secs_f64(duration)),
        );
    }
    if let Some(frames) = props.frame_estimate() {
        print_info("Estimated frames", frames);
    }
    Ok(())
}

fn image_dimensions(path: &std::path::Path) -> CoreResult<(u32, u32)> {
    let mut source = ImageSource::new(path);
    let frame = source
        .next_frame()?
        .ok_or_else(|| CoreError::ImageDecode(format!("no frame in {}", path.display())))?;
    Ok((frame.width(), frame.height()))
}

use std::sync::Arc;

use clipstack_operations::operations::{CreatePostInput, CreatePostOperation, VideoMetadata};

use super::PostCreateArgs;
use crate::error::Result;
use crate::session::Session;
use crate::upload;

pub(super) fn create(args: PostCreateArgs, session: &Session) -> Result<()> {
    let thumbnail = upload::read(&args.thumbnail)?;
    let video = upload::read(&args.video)?;

    let size = video.size();
    let format = args.format.unwrap_or_else(|| {
        args.video
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    });
    let title = args.title.unwrap_or_else(|| {
        args.video
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let metadata = VideoMetadata {
        length_in_milliseconds: args.duration_ms,
        mime_type: video.content_type.clone(),
        codec: args.codec,
        format,
        height: args.height,
        width: args.width,
        bit_rate: args
            .bit_rate
            .unwrap_or_else(|| bit_rate(size, args.duration_ms)),
        ratio: args.ratio.unwrap_or_else(|| ratio(args.width, args.height)),
        size,
        title,
        fps: args.fps,
    };

    let input = CreatePostInput {
        thumbnail,
        video,
        thumbnail_width: args.thumbnail_width,
        thumbnail_height: args.thumbnail_height,
        metadata,
        caption: args.caption,
        visibility: args.visibility,
    };

    let operation = CreatePostOperation::new(
        Arc::clone(&session.store),
        Arc::clone(&session.store),
        Arc::clone(&session.images),
    );
    let post = operation.execute(&session.request, input)?;

    session.output.emit(&post)
}

/// Average bits per second; zero when the duration is unknown.
fn bit_rate(size: u64, duration_ms: u64) -> u64 {
    if duration_ms == 0 {
        return 0;
    }
    size.saturating_mul(8_000) / duration_ms
}

fn ratio(width: u32, height: u32) -> String {
    fn gcd(a: u32, b: u32) -> u32 {
        if b == 0 { a } else { gcd(b, a % b) }
    }

    match gcd(width, height) {
        0 => format!("{width}:{height}"),
        d => format!("{}:{}", width / d, height / d),
    }
}

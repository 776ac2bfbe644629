use clipstack_core::PostVisibility;

use super::operation::{CreatePostInput, VideoMetadata};
use crate::operations::{ValidationError, ValidationErrorCollector, ValidationErrors};
use crate::traits::MediaUpload;

#[derive(Debug, Clone)]
pub(super) struct ValidatedPost {
    pub(super) thumbnail: MediaUpload,
    pub(super) video: MediaUpload,
    pub(super) thumbnail_width: u32,
    pub(super) thumbnail_height: u32,
    pub(super) metadata: VideoMetadata,
    pub(super) caption: String,
    pub(super) visibility: PostVisibility,
}

pub(super) fn validate(input: CreatePostInput) -> Result<ValidatedPost, ValidationErrors> {
    let mut collector = ValidationErrorCollector::new();

    collector.file("thumbnail", input.thumbnail.size(), u64::MAX);
    collector.file("video", input.video.size(), u64::MAX);
    collector.positive("thumbnail_width", input.thumbnail_width);
    collector.positive("thumbnail_height", input.thumbnail_height);

    let meta = &input.metadata;
    collector.positive("length_in_milliseconds", meta.length_in_milliseconds);
    collector.positive("height", meta.height);
    collector.positive("width", meta.width);
    collector.positive("bit_rate", meta.bit_rate);
    collector.positive("size", meta.size);
    collector.positive("fps", meta.fps);

    let mut metadata = meta.clone();
    for (field, value) in [
        ("mime_type", &mut metadata.mime_type),
        ("codec", &mut metadata.codec),
        ("format", &mut metadata.format),
        ("ratio", &mut metadata.ratio),
        ("title", &mut metadata.title),
    ] {
        if let Some(trimmed) = collector.text(field, value, None) {
            *value = trimmed.to_string();
        }
    }

    let caption = collector
        .text("caption", &input.caption, None)
        .map(str::to_string);
    let visibility = collector
        .text("visibility", &input.visibility, None)
        .and_then(|raw| collector.parsed("visibility", raw.parse::<PostVisibility>()));

    match (collector.into_errors(), caption, visibility) {
        (None, Some(caption), Some(visibility)) => Ok(ValidatedPost {
            thumbnail: input.thumbnail,
            video: input.video,
            thumbnail_width: input.thumbnail_width,
            thumbnail_height: input.thumbnail_height,
            metadata,
            caption,
            visibility,
        }),
        (Some(errors), ..) => Err(errors),
        (None, caption, _) => Err(ValidationErrors::single(ValidationError::Blank {
            field: if caption.is_none() { "caption" } else { "visibility" },
        })),
    }
}

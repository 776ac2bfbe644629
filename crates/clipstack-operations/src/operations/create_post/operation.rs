use std::sync::Arc;

use chrono::Utc;
use clipstack_core::{Post, PostId, Thumbnail, ThumbnailId, UserProfile, Video, VideoId};
use clipstack_saga::SagaBuilder;
use tracing::{debug, info, warn};
use url::Url;

use super::context::PostSagaContext;
use super::saga_data::PostSagaData;
use super::saga_steps::{InsertPostStep, InsertThumbnailStep, InsertVideoStep};
use super::validator::{self, ValidatedPost};
use crate::context::RequestContext;
use crate::error::{OperationError, Result};
use crate::providers::tables::PROFILES;
use crate::traits::{ImageStorage, MediaStore, MediaUpload, ProfileStore};

/// Technical description of the uploaded video, as reported by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub length_in_milliseconds: u64,
    pub mime_type: String,
    pub codec: String,
    pub format: String,
    pub height: u32,
    pub width: u32,
    pub bit_rate: u64,
    pub ratio: String,
    pub size: u64,
    pub title: String,
    pub fps: u32,
}

#[derive(Debug, Clone)]
pub struct CreatePostInput {
    pub thumbnail: MediaUpload,
    pub video: MediaUpload,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub metadata: VideoMetadata,
    pub caption: String,
    /// `public`, `friends`, `private` or `unlisted`
    pub visibility: String,
}

/// Publishes a video post: thumbnail, video and post rows plus both media files.
pub struct CreatePostOperation<P, M, I> {
    profiles: Arc<P>,
    media: Arc<M>,
    images: Arc<I>,
}

impl<P, M, I> CreatePostOperation<P, M, I>
where
    P: ProfileStore,
    M: MediaStore + 'static,
    I: ImageStorage,
{
    #[must_use]
    pub fn new(profiles: Arc<P>, media: Arc<M>, images: Arc<I>) -> Self {
        Self {
            profiles,
            media,
            images,
        }
    }

    /// # Errors
    ///
    /// Returns `Unauthenticated`, `ValidationFailed`, `ProfileNotFound` when
    /// the caller has no profile, `MediaUploadFailed`, or a storage error if
    /// the saga had to be rolled back.
    pub fn execute(&self, ctx: &RequestContext, input: CreatePostInput) -> Result<Post> {
        let user_id = ctx.require_principal()?;
        let post = validator::validate(input)?;

        let profile = self
            .profiles
            .find_profile_by_user(user_id)
            .map_err(OperationError::read(PROFILES))?
            .ok_or_else(|| OperationError::ProfileNotFound(user_id.clone()))?;

        let thumbnail_url = self.upload(&post.thumbnail, "thumbnail")?;
        let video_url = match self.upload(&post.video, "video") {
            Ok(url) => url,
            Err(err) => {
                self.discard(&thumbnail_url);
                return Err(err);
            }
        };

        let data = Self::rows(&profile, post, &thumbnail_url, &video_url);
        let saga = SagaBuilder::new()
            .first_step(InsertThumbnailStep::<M>::new())
            .then(InsertVideoStep::<M>::new())
            .then(InsertPostStep::<M>::new())
            .build();
        let saga_context = PostSagaContext::new(Arc::clone(&self.media));

        let (result, journal) = saga.execute_with_journal(&saga_context, data);
        debug!(journal = %journal.summary(), "post saga finished");

        match result {
            Ok(data) => {
                info!(user = %user_id, post = %data.post.post_id, "published post");
                Ok(data.post)
            }
            Err(err) => {
                self.discard(&video_url);
                self.discard(&thumbnail_url);
                Err(err.into())
            }
        }
    }

    fn upload(&self, file: &MediaUpload, media: &'static str) -> Result<Url> {
        self.images
            .upload(file)
            .map_err(|source| OperationError::MediaUploadFailed { media, source })
    }

    fn discard(&self, url: &Url) {
        if let Err(error) = self.images.delete(url) {
            warn!(%url, error = ?error, "failed to delete orphaned media");
        }
    }

    fn rows(
        profile: &UserProfile,
        post: ValidatedPost,
        thumbnail_url: &Url,
        video_url: &Url,
    ) -> PostSagaData {
        let now = Utc::now();
        let thumbnail = Thumbnail {
            thumb_id: ThumbnailId::generate(),
            thumb_uri: thumbnail_url.to_string(),
            width: post.thumbnail_width,
            height: post.thumbnail_height,
        };
        let post_id = PostId::generate();
        let meta = post.metadata;
        let video = Video {
            video_id: VideoId::generate(),
            user_id: profile.user_id.clone(),
            post_id,
            thumbnail_id: thumbnail.thumb_id,
            length_in_milliseconds: meta.length_in_milliseconds,
            mime_type: meta.mime_type,
            video_uri: video_url.to_string(),
            codec: meta.codec,
            format: meta.format,
            height: meta.height,
            width: meta.width,
            bit_rate: meta.bit_rate,
            ratio: meta.ratio,
            size: meta.size,
            title: meta.title,
            fps: meta.fps,
            created_at: now,
        };
        let post = Post::published(
            post_id,
            profile.user_id.clone(),
            profile.profile_id,
            video.video_id,
            post.caption,
            post.visibility,
            now,
        );

        PostSagaData {
            thumbnail,
            video,
            post,
        }
    }
}

use clipstack_core::{Post, PostId, Thumbnail, ThumbnailId, Video, VideoId};

use crate::error::StoreError;

/// Thumbnails, videos and posts. A video must reference an existing
/// thumbnail; a post must reference an existing profile and video.
pub trait MediaStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the id already exists.
    fn insert_thumbnail(&self, thumbnail: &Thumbnail) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the id exists or the
    /// thumbnail is missing.
    fn insert_video(&self, video: &Video) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the id exists or the
    /// profile or video is missing.
    fn insert_post(&self, post: &Post) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_thumbnail(&self, id: &ThumbnailId) -> Result<Option<Thumbnail>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_video(&self, id: &VideoId) -> Result<Option<Video>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_post(&self, id: &PostId) -> Result<Option<Post>, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` while a video still references it.
    fn delete_thumbnail(&self, id: &ThumbnailId) -> Result<bool, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` while a post still references it.
    fn delete_video(&self, id: &VideoId) -> Result<bool, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_post(&self, id: &PostId) -> Result<bool, StoreError>;
}

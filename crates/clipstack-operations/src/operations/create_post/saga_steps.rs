use std::marker::PhantomData;

use clipstack_saga::SagaStep;
use tracing::debug;

use super::context::PostSagaContext;
use super::saga_data::PostSagaData;
use crate::OperationError;
use crate::providers::tables::{POSTS, THUMBNAILS, VIDEOS};
use crate::traits::MediaStore;

pub(super) struct InsertThumbnailStep<M> {
    _marker: PhantomData<M>,
}

impl<M> InsertThumbnailStep<M> {
    pub(super) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M: MediaStore> SagaStep for InsertThumbnailStep<M> {
    type Input = PostSagaData;
    type Output = PostSagaData;
    type Context = PostSagaContext<M>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "insert_thumbnail"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        ctx.media()
            .insert_thumbnail(&input.thumbnail)
            .map_err(OperationError::write(THUMBNAILS))?;
        debug!(thumbnail = %input.thumbnail.thumb_id, "inserted thumbnail");
        Ok(input)
    }

    fn compensate(&self, ctx: &Self::Context, input: Self::Input) -> Result<(), Self::Error> {
        ctx.media()
            .delete_thumbnail(&input.thumbnail.thumb_id)
            .map_err(OperationError::write(THUMBNAILS))?;
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "delete the inserted thumbnail row".to_string()
    }
}

pub(super) struct InsertVideoStep<M> {
    _marker: PhantomData<M>,
}

impl<M> InsertVideoStep<M> {
    pub(super) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M: MediaStore> SagaStep for InsertVideoStep<M> {
    type Input = PostSagaData;
    type Output = PostSagaData;
    type Context = PostSagaContext<M>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "insert_video"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        ctx.media()
            .insert_video(&input.video)
            .map_err(OperationError::write(VIDEOS))?;
        debug!(video = %input.video.video_id, "inserted video");
        Ok(input)
    }

    fn compensate(&self, ctx: &Self::Context, input: Self::Input) -> Result<(), Self::Error> {
        ctx.media()
            .delete_video(&input.video.video_id)
            .map_err(OperationError::write(VIDEOS))?;
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "delete the inserted video row".to_string()
    }
}

pub(super) struct InsertPostStep<M> {
    _marker: PhantomData<M>,
}

impl<M> InsertPostStep<M> {
    pub(super) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M: MediaStore> SagaStep for InsertPostStep<M> {
    type Input = PostSagaData;
    type Output = PostSagaData;
    type Context = PostSagaContext<M>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "insert_post"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        ctx.media()
            .insert_post(&input.post)
            .map_err(OperationError::write(POSTS))?;
        debug!(post = %input.post.post_id, "inserted post");
        Ok(input)
    }

    fn compensate(&self, ctx: &Self::Context, input: Self::Input) -> Result<(), Self::Error> {
        ctx.media()
            .delete_post(&input.post.post_id)
            .map_err(OperationError::write(POSTS))?;
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "delete the inserted post row".to_string()
    }
}

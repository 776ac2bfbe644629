use std::sync::Arc;

use crate::traits::MediaStore;

pub(super) struct PostSagaContext<M> {
    media: Arc<M>,
}

impl<M> Clone for PostSagaContext<M> {
    fn clone(&self) -> Self {
        Self {
            media: Arc::clone(&self.media),
        }
    }
}

impl<M: MediaStore> PostSagaContext<M> {
    pub(super) fn new(media: Arc<M>) -> Self {
        Self { media }
    }

    pub(super) fn media(&self) -> &M {
        &self.media
    }
}

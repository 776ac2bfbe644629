use clipstack_core::{Post, Thumbnail, Video};

/// The three rows of a post, keyed and linked before any is written.
#[derive(Debug, Clone)]
pub(super) struct PostSagaData {
    pub(super) thumbnail: Thumbnail,
    pub(super) video: Video,
    pub(super) post: Post,
}

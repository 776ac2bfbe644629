use url::Url;

use crate::error::MediaError;

/// A file received from the caller, held in memory until stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Public blob storage for avatars, thumbnails and videos.
pub trait ImageStorage: Send + Sync {
    /// Stores the payload under a fresh name and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is empty or cannot be stored.
    fn upload(&self, upload: &MediaUpload) -> Result<Url, MediaError>;

    /// # Errors
    ///
    /// Returns an error if the URL was not issued by this storage or the
    /// blob cannot be removed.
    fn delete(&self, url: &Url) -> Result<(), MediaError>;
}

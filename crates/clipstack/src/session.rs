use std::sync::Arc;

use clipstack_config::ClipstackConfig;
use clipstack_core::UserId;
use clipstack_operations::RequestContext;
use clipstack_operations::providers::{FileSystemImageStorage, JsonFileStore};
use tracing::debug;

use crate::error::{CliError, Result};
use crate::output::Output;

/// Everything a command needs: opened providers, the caller and config values.
pub(crate) struct Session {
    pub(crate) store: Arc<JsonFileStore>,
    pub(crate) images: Arc<FileSystemImageStorage>,
    pub(crate) request: RequestContext,
    pub(crate) output: Output,
    pub(crate) max_upload_bytes: u64,
    pub(crate) default_language: String,
}

impl Session {
    pub(crate) fn open(
        config: &ClipstackConfig,
        as_user: Option<&str>,
        json: bool,
    ) -> Result<Self> {
        let principal = as_user
            .map(UserId::new)
            .transpose()
            .map_err(CliError::InvalidUser)?;
        let request =
            principal.map_or_else(RequestContext::anonymous, RequestContext::authenticated);

        let store = JsonFileStore::open(config.storage().data_dir())?;
        let media = config.media();
        let images = FileSystemImageStorage::new(
            media.dir().to_path_buf(),
            media.public_base_url().clone(),
        );
        debug!(
            store = %store.path().display(),
            media = %images.dir().display(),
            principal = ?request.principal(),
            "session opened"
        );

        Ok(Self {
            store: Arc::new(store),
            images: Arc::new(images),
            request,
            output: if json { Output::Json } else { Output::Plain },
            max_upload_bytes: media.max_upload_bytes(),
            default_language: config.preferences().default_language().to_string(),
        })
    }
}

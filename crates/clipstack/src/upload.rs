use std::fs;
use std::path::Path;

use clipstack_operations::traits::MediaUpload;

use crate::error::{CliError, Result};

/// Guesses a MIME type from the file extension.
pub(crate) fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

pub(crate) fn read(path: &Path) -> Result<MediaUpload> {
    let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(MediaUpload::new(file_name, content_type(path), bytes))
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::MediaError;
use crate::traits::{ImageStorage, MediaUpload};

const MAX_STEM_CHARS: usize = 40;
const MAX_EXTENSION_CHARS: usize = 8;

/// Stores blobs as files in one directory, served from `base_url`.
///
/// Names keep a sanitized form of the original file name plus a random
/// suffix, so two uploads of `avatar.png` never collide.
#[derive(Debug, Clone)]
pub struct FileSystemImageStorage {
    dir: PathBuf,
    base_url: Url,
}

impl FileSystemImageStorage {
    #[must_use]
    pub fn new(dir: PathBuf, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { dir, base_url }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn stored_name(&self, url: &Url) -> Option<String> {
        let name = url.as_str().strip_prefix(self.base_url.as_str())?;
        let valid = !name.is_empty()
            && !name.contains(['/', '\\', '?', '#'])
            && name != "."
            && name != "..";
        valid.then(|| name.to_string())
    }
}

fn sanitize(part: &str, max: usize) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .take(max)
        .collect()
}

fn unique_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| sanitize(s, MAX_STEM_CHARS))
        .filter(|s| !s.trim_matches('-').is_empty())
        .unwrap_or_else(|| "file".to_string());
    let suffix = Uuid::new_v4().simple().to_string();

    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| sanitize(e, MAX_EXTENSION_CHARS))
    {
        Some(ext) if !ext.is_empty() => format!("{stem}-{suffix}.{ext}"),
        _ => format!("{stem}-{suffix}"),
    }
}

/// Stages `bytes` in `dir` and moves them to `path` only once fully written.
/// The staged file is removed on any failure, and an existing `path` is
/// never replaced.
fn write_blob(dir: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist_noclobber(path).map_err(|err| err.error)?;
    Ok(())
}

impl ImageStorage for FileSystemImageStorage {
    fn upload(&self, upload: &MediaUpload) -> Result<Url, MediaError> {
        if upload.bytes.is_empty() {
            return Err(MediaError::EmptyPayload(upload.file_name.clone()));
        }

        fs::create_dir_all(&self.dir).map_err(|source| MediaError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let name = unique_name(&upload.file_name);
        let path = self.dir.join(&name);
        let url = self
            .base_url
            .join(&name)
            .map_err(|source| MediaError::Url {
                name: name.clone(),
                source,
            })?;

        write_blob(&self.dir, &path, &upload.bytes).map_err(|source| MediaError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(
            path = %path.display(),
            size = upload.size(),
            content_type = %upload.content_type,
            "stored media file"
        );
        Ok(url)
    }

    fn delete(&self, url: &Url) -> Result<(), MediaError> {
        let name = self
            .stored_name(url)
            .ok_or_else(|| MediaError::ForeignUrl(url.clone()))?;
        let path = self.dir.join(name);

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "deleted media file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MediaError::Delete { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn storage(dir: &TempDir) -> anyhow::Result<FileSystemImageStorage> {
        Ok(FileSystemImageStorage::new(
            dir.path().join("media"),
            Url::parse("https://cdn.example.com/media")?,
        ))
    }

    #[test]
    fn upload_writes_file_and_returns_public_url() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = storage(&dir)?;

        let url = storage.upload(&MediaUpload::new("Me Avatar.PNG", "image/png", vec![1, 2, 3]))?;

        let name = url
            .as_str()
            .strip_prefix("https://cdn.example.com/media/")
            .expect("under base url");
        assert!(name.starts_with("me-avatar-"));
        assert!(name.ends_with(".png"));
        assert_eq!(fs::read(storage.dir().join(name))?, vec![1, 2, 3]);

        Ok(())
    }

    #[test]
    fn failed_store_leaves_no_partial_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let taken = dir.path().join("avatar.png");
        fs::write(&taken, [9])?;

        let err = write_blob(dir.path(), &taken, &[1, 2, 3]).expect_err("target exists");

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        let names: Vec<_> = fs::read_dir(dir.path())?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<Result<_, _>>()?;
        assert_eq!(names, vec![std::ffi::OsString::from("avatar.png")]);
        assert_eq!(fs::read(&taken)?, vec![9]);
        Ok(())
    }

    #[test]
    fn unwritable_media_dir_reports_write_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let blocker = dir.path().join("media");
        fs::write(&blocker, "not a directory")?;
        let storage = FileSystemImageStorage::new(blocker, Url::parse("https://cdn.example.com/")?);

        let err = storage
            .upload(&MediaUpload::new("a.png", "image/png", vec![1]))
            .expect_err("media dir is a file");

        assert!(matches!(err, MediaError::Write { .. }));
        Ok(())
    }

    #[test]
    fn identical_names_get_distinct_urls() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = storage(&dir)?;
        let upload = MediaUpload::new("avatar.png", "image/png", vec![7]);

        let first = storage.upload(&upload)?;
        let second = storage.upload(&upload)?;

        assert_ne!(first, second);

        Ok(())
    }

    #[test]
    fn empty_payload_is_rejected() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = storage(&dir)?;

        let err = storage
            .upload(&MediaUpload::new("empty.png", "image/png", Vec::new()))
            .expect_err("empty");

        assert!(matches!(err, MediaError::EmptyPayload(_)));

        Ok(())
    }

    #[test]
    fn delete_removes_uploaded_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = storage(&dir)?;
        let url = storage.upload(&MediaUpload::new("clip.mp4", "video/mp4", vec![0; 16]))?;

        storage.delete(&url)?;

        assert_eq!(fs::read_dir(storage.dir())?.count(), 0);
        storage.delete(&url)?;

        Ok(())
    }

    #[test]
    fn delete_refuses_foreign_urls() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = storage(&dir)?;

        let outside = Url::parse("https://elsewhere.example.com/media/a.png")?;
        let traversal = Url::parse("https://cdn.example.com/media/sub/a.png")?;

        assert!(matches!(
            storage.delete(&outside),
            Err(MediaError::ForeignUrl(_))
        ));
        assert!(matches!(
            storage.delete(&traversal),
            Err(MediaError::ForeignUrl(_))
        ));

        Ok(())
    }

    #[test]
    fn unnamed_upload_falls_back_to_generic_stem() {
        let name = unique_name("###");

        assert!(name.starts_with("file-"));
    }
}

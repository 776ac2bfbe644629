use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use clipstack_core::{
    Post, PostId, PreferenceId, ProfileId, Thumbnail, ThumbnailId, User, UserId, UserPreferences,
    UserProfile, Video, VideoId,
};
use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;

use super::tables::{Tables, impl_table_stores};
use crate::error::StoreError;

pub const STORE_FILENAME: &str = "clipstack.json";
pub const LOCK_FILENAME: &str = "clipstack.lock";

/// Advisory lock on the lock file next to the document, released on drop.
struct DocumentLock {
    file: File,
}

impl DocumentLock {
    fn acquire(path: &Path, exclusive: bool) -> Result<Self, StoreError> {
        let lock_error = |source| StoreError::Lock {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(lock_error)?;
        if exclusive {
            FileExt::lock_exclusive(&file).map_err(lock_error)?;
        } else {
            FileExt::lock_shared(&file).map_err(lock_error)?;
        }
        Ok(Self { file })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Store persisted as one JSON document under a data directory.
///
/// Any number of handles, in one process or many, may share a data directory.
/// Reads take a shared lock on `clipstack.lock` and writes an exclusive one;
/// both reload the document under the lock, so every statement sees the rows
/// committed through other handles. A write is applied to a copy of the
/// tables, flushed to a temporary file next to the document and renamed over
/// it. A failed write leaves both the file and the handle untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
    tables: Mutex<Tables>,
}

impl JsonFileStore {
    /// Opens the store in `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or an existing
    /// document cannot be locked, read or parsed.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|source| StoreError::Write {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let path = data_dir.join(STORE_FILENAME);
        let lock_path = data_dir.join(LOCK_FILENAME);
        let tables = {
            let _lock = DocumentLock::acquire(&lock_path, false)?;
            load(&path)?
        };
        debug!(path = %path.display(), "opened json store");

        Ok(Self {
            path,
            lock_path,
            tables: Mutex::new(tables),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }

    fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        let mut tables = self.lock()?;
        let _lock = DocumentLock::acquire(&self.lock_path, false)?;
        *tables = load(&self.path)?;
        Ok(query(&tables))
    }

    fn write<T>(
        &self,
        statement: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut tables = self.lock()?;
        let _lock = DocumentLock::acquire(&self.lock_path, true)?;
        let mut next = load(&self.path)?;
        let result = statement(&mut next)?;
        self.persist(&next)?;
        *tables = next;
        Ok(result)
    }

    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_vec_pretty(tables).map_err(StoreError::Serialize)?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
        staged.write_all(&json).map_err(write_error)?;
        staged.as_file().sync_all().map_err(write_error)?;
        staged
            .persist(&self.path)
            .map_err(|err| write_error(err.error))?;
        Ok(())
    }
}

/// Reads the document at `path`; a missing document is an empty store.
fn load(path: &Path) -> Result<Tables, StoreError> {
    if !path.exists() {
        return Ok(Tables::default());
    }
    let content = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

impl_table_stores!(JsonFileStore);

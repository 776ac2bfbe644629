use std::sync::{Mutex, MutexGuard};

use clipstack_core::{
    Post, PostId, PreferenceId, ProfileId, Thumbnail, ThumbnailId, User, UserId, UserPreferences,
    UserProfile, Video, VideoId,
};

use super::tables::{Tables, impl_table_stores};
use crate::error::StoreError;

/// Process-local store. One lock guards every table, so each write sees and
/// checks a consistent snapshot.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }

    fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        Ok(query(&*self.lock()?))
    }

    fn write<T>(
        &self,
        statement: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        statement(&mut *self.lock()?)
    }
}

impl_table_stores!(InMemoryStore);

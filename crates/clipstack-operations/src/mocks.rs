use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use clipstack_core::{
    Post, PostId, PreferenceId, ProfileId, Thumbnail, ThumbnailId, User, UserId, UserPreferences,
    UserProfile, Video, VideoId,
};
use url::Url;

use crate::error::{MediaError, StoreError};
use crate::providers::InMemoryStore;
use crate::traits::{
    ImageStorage, MediaStore, MediaUpload, PreferencesStore, ProfileStore, UserStore,
};

/// Store calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    FindUser,
    InsertProfile,
    InsertPreferences,
    SetProfileState,
    ZeroRowsOnUserUpdate,
    DeleteProfile,
    DeletePreferences,
    FindProfile,
    FindPreferences,
    ModifyPreferences,
    InsertThumbnail,
    InsertVideo,
    InsertPost,
    DeleteThumbnail,
    DeleteVideo,
    DeletePost,
}

/// In-memory store that records every trait call and fails on demand.
pub struct MockStore {
    inner: InMemoryStore,
    faults: HashSet<Fault>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl MockStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            faults: HashSet::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// # Panics
    ///
    /// Panics if the user cannot be seeded.
    #[must_use]
    pub fn with_user(self, id: &UserId) -> Self {
        let email = format!("{id}@example.com");
        self.inner
            .insert_user(&User::new(id.clone(), id.as_str(), email))
            .expect("seed user");
        self
    }

    /// # Panics
    ///
    /// Panics if the profile cannot be seeded.
    #[must_use]
    pub fn with_profile(self, profile: &UserProfile) -> Self {
        self.inner.insert_profile(profile).expect("seed profile");
        self
    }

    /// # Panics
    ///
    /// Panics if the preferences cannot be seeded.
    #[must_use]
    pub fn with_preferences(self, preferences: &UserPreferences) -> Self {
        self.inner
            .insert_preferences(preferences)
            .expect("seed preferences");
        self
    }

    #[must_use]
    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.faults.insert(fault);
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the inner store fails.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<User> {
        self.inner.find_user(id).expect("read user")
    }

    /// # Panics
    ///
    /// Panics if the inner store fails.
    #[must_use]
    pub fn profile_of(&self, id: &UserId) -> Option<UserProfile> {
        self.inner.find_profile_by_user(id).expect("read profile")
    }

    /// # Panics
    ///
    /// Panics if the inner store fails.
    #[must_use]
    pub fn preferences_of(&self, id: &UserId) -> Option<UserPreferences> {
        self.inner
            .find_preferences_by_user(id)
            .expect("read preferences")
    }

    /// # Panics
    ///
    /// Panics if the inner store fails.
    #[must_use]
    pub fn thumbnail(&self, id: &ThumbnailId) -> Option<Thumbnail> {
        self.inner.find_thumbnail(id).expect("read thumbnail")
    }

    /// # Panics
    ///
    /// Panics if the inner store fails.
    #[must_use]
    pub fn video(&self, id: &VideoId) -> Option<Video> {
        self.inner.find_video(id).expect("read video")
    }

    fn record(&self, call: &'static str, fault: Fault) -> Result<(), StoreError> {
        self.calls.lock().expect("lock poisoned").push(call);
        if self.faults.contains(&fault) {
            return Err(StoreError::Unavailable(format!("injected failure in {call}")));
        }
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MockStore {
    fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        self.inner.insert_user(user)
    }

    fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.record("find_user", Fault::FindUser)?;
        self.inner.find_user(id)
    }

    fn set_profile_state(
        &self,
        id: &UserId,
        has_profile: bool,
        image: Option<&str>,
    ) -> Result<usize, StoreError> {
        self.record("set_profile_state", Fault::SetProfileState)?;
        if self.faults.contains(&Fault::ZeroRowsOnUserUpdate) && has_profile {
            return Ok(0);
        }
        self.inner.set_profile_state(id, has_profile, image)
    }
}

impl ProfileStore for MockStore {
    fn insert_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.record("insert_profile", Fault::InsertProfile)?;
        self.inner.insert_profile(profile)
    }

    fn find_profile_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        self.record("find_profile_by_user", Fault::FindProfile)?;
        self.inner.find_profile_by_user(user_id)
    }

    fn delete_profile(&self, id: &ProfileId) -> Result<bool, StoreError> {
        self.record("delete_profile", Fault::DeleteProfile)?;
        self.inner.delete_profile(id)
    }
}

impl PreferencesStore for MockStore {
    fn insert_preferences(&self, preferences: &UserPreferences) -> Result<(), StoreError> {
        self.record("insert_preferences", Fault::InsertPreferences)?;
        self.inner.insert_preferences(preferences)
    }

    fn find_preferences_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserPreferences>, StoreError> {
        self.record("find_preferences_by_user", Fault::FindPreferences)?;
        self.inner.find_preferences_by_user(user_id)
    }

    fn modify_preferences(
        &self,
        user_id: &UserId,
        change: &mut dyn FnMut(&mut UserPreferences),
    ) -> Result<Option<UserPreferences>, StoreError> {
        self.record("modify_preferences", Fault::ModifyPreferences)?;
        self.inner.modify_preferences(user_id, change)
    }

    fn delete_preferences(&self, id: &PreferenceId) -> Result<bool, StoreError> {
        self.record("delete_preferences", Fault::DeletePreferences)?;
        self.inner.delete_preferences(id)
    }
}

impl MediaStore for MockStore {
    fn insert_thumbnail(&self, thumbnail: &Thumbnail) -> Result<(), StoreError> {
        self.record("insert_thumbnail", Fault::InsertThumbnail)?;
        self.inner.insert_thumbnail(thumbnail)
    }

    fn insert_video(&self, video: &Video) -> Result<(), StoreError> {
        self.record("insert_video", Fault::InsertVideo)?;
        self.inner.insert_video(video)
    }

    fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        self.record("insert_post", Fault::InsertPost)?;
        self.inner.insert_post(post)
    }

    fn find_thumbnail(&self, id: &ThumbnailId) -> Result<Option<Thumbnail>, StoreError> {
        self.inner.find_thumbnail(id)
    }

    fn find_video(&self, id: &VideoId) -> Result<Option<Video>, StoreError> {
        self.inner.find_video(id)
    }

    fn find_post(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        self.inner.find_post(id)
    }

    fn delete_thumbnail(&self, id: &ThumbnailId) -> Result<bool, StoreError> {
        self.record("delete_thumbnail", Fault::DeleteThumbnail)?;
        self.inner.delete_thumbnail(id)
    }

    fn delete_video(&self, id: &VideoId) -> Result<bool, StoreError> {
        self.record("delete_video", Fault::DeleteVideo)?;
        self.inner.delete_video(id)
    }

    fn delete_post(&self, id: &PostId) -> Result<bool, StoreError> {
        self.record("delete_post", Fault::DeletePost)?;
        self.inner.delete_post(id)
    }
}

/// Image storage that keeps nothing and hands out predictable URLs.
pub struct MockImageStorage {
    uploads: Arc<Mutex<Vec<Url>>>,
    deleted: Arc<Mutex<Vec<Url>>>,
    uploads_before_failure: Option<usize>,
    fail_deletes: bool,
}

impl MockImageStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            uploads_before_failure: None,
            fail_deletes: false,
        }
    }

    #[must_use]
    pub fn failing_uploads(self) -> Self {
        self.failing_uploads_after(0)
    }

    /// Accept `count` uploads, then fail every following one.
    #[must_use]
    pub fn failing_uploads_after(mut self, count: usize) -> Self {
        self.uploads_before_failure = Some(count);
        self
    }

    #[must_use]
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn uploads(&self) -> Vec<Url> {
        self.uploads.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn deleted(&self) -> Vec<Url> {
        self.deleted.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockImageStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStorage for MockImageStorage {
    fn upload(&self, upload: &MediaUpload) -> Result<Url, MediaError> {
        let mut uploads = self.uploads.lock().expect("lock poisoned");
        if self
            .uploads_before_failure
            .is_some_and(|limit| uploads.len() >= limit)
        {
            return Err(MediaError::Unavailable("injected upload failure".to_string()));
        }
        let url = Url::parse(&format!(
            "https://media.test/{}-{}",
            uploads.len(),
            upload.file_name
        ))
        .map_err(|source| MediaError::Url {
            name: upload.file_name.clone(),
            source,
        })?;
        uploads.push(url.clone());
        Ok(url)
    }

    fn delete(&self, url: &Url) -> Result<(), MediaError> {
        if self.fail_deletes {
            return Err(MediaError::Unavailable("injected delete failure".to_string()));
        }
        self.deleted.lock().expect("lock poisoned").push(url.clone());
        Ok(())
    }
}

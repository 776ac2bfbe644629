use std::sync::Arc;

use clipstack_core::{UserPreferences, UserProfile};
use tracing::debug;

use crate::context::RequestContext;
use crate::error::{OperationError, Result};
use crate::providers::tables::{PREFERENCES, PROFILES};
use crate::traits::{PreferencesStore, ProfileStore};

pub struct FetchProfileOperation<P> {
    profiles: Arc<P>,
}

impl<P: ProfileStore> FetchProfileOperation<P> {
    #[must_use]
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    /// Returns the caller's own profile.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `ProfileNotFound` or `StorageReadFailed`.
    pub fn execute(&self, ctx: &RequestContext) -> Result<UserProfile> {
        let user_id = ctx.require_principal()?;
        debug!(user = %user_id, "fetching profile");

        self.profiles
            .find_profile_by_user(user_id)
            .map_err(OperationError::read(PROFILES))?
            .ok_or_else(|| OperationError::ProfileNotFound(user_id.clone()))
    }
}

pub struct FetchPreferencesOperation<R> {
    preferences: Arc<R>,
}

impl<R: PreferencesStore> FetchPreferencesOperation<R> {
    #[must_use]
    pub fn new(preferences: Arc<R>) -> Self {
        Self { preferences }
    }

    /// Returns the caller's own preferences.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `PreferencesNotFound` or `StorageReadFailed`.
    pub fn execute(&self, ctx: &RequestContext) -> Result<UserPreferences> {
        let user_id = ctx.require_principal()?;
        debug!(user = %user_id, "fetching preferences");

        self.preferences
            .find_preferences_by_user(user_id)
            .map_err(OperationError::read(PREFERENCES))?
            .ok_or_else(|| OperationError::PreferencesNotFound(user_id.clone()))
    }
}

use std::sync::Arc;

use chrono::Utc;
use clipstack_core::{ProfileType, UserPreferences};
use serde::Deserialize;
use tracing::info;

use crate::context::RequestContext;
use crate::error::{OperationError, Result};
use crate::operations::{ValidationError, ValidationErrors};
use crate::providers::tables::PREFERENCES;
use crate::traits::PreferencesStore;

/// A partial update of one preferences section. Unset fields stay untouched.
pub trait PreferenceChange {
    /// Section name used in logs.
    const SECTION: &'static str;

    fn is_empty(&self) -> bool;

    fn apply(&self, preferences: &mut UserPreferences);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationUpdate {
    pub new_comment_notification: Option<bool>,
    pub new_follow_notification: Option<bool>,
    pub new_like_notification: Option<bool>,
    pub new_dislike_notification: Option<bool>,
}

impl PreferenceChange for NotificationUpdate {
    const SECTION: &'static str = "notification";

    fn is_empty(&self) -> bool {
        self.new_comment_notification.is_none()
            && self.new_follow_notification.is_none()
            && self.new_like_notification.is_none()
            && self.new_dislike_notification.is_none()
    }

    fn apply(&self, preferences: &mut UserPreferences) {
        if let Some(value) = self.new_comment_notification {
            preferences.new_comment_notification = value;
        }
        if let Some(value) = self.new_follow_notification {
            preferences.new_follow_notification = value;
        }
        if let Some(value) = self.new_like_notification {
            preferences.new_like_notification = value;
        }
        if let Some(value) = self.new_dislike_notification {
            preferences.new_dislike_notification = value;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackUpdate {
    pub auto_play_video: Option<bool>,
    pub auto_mute_video: Option<bool>,
    pub enable_hdr: Option<bool>,
}

impl PreferenceChange for PlaybackUpdate {
    const SECTION: &'static str = "playback";

    fn is_empty(&self) -> bool {
        self.auto_play_video.is_none()
            && self.auto_mute_video.is_none()
            && self.enable_hdr.is_none()
    }

    fn apply(&self, preferences: &mut UserPreferences) {
        if let Some(value) = self.auto_play_video {
            preferences.auto_play_video = value;
        }
        if let Some(value) = self.auto_mute_video {
            preferences.auto_mute_video = value;
        }
        if let Some(value) = self.enable_hdr {
            preferences.enable_hdr = value;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyUpdate {
    pub account_privacy: Option<ProfileType>,
}

impl PreferenceChange for PrivacyUpdate {
    const SECTION: &'static str = "privacy";

    fn is_empty(&self) -> bool {
        self.account_privacy.is_none()
    }

    fn apply(&self, preferences: &mut UserPreferences) {
        if let Some(privacy) = self.account_privacy {
            preferences.account_privacy = privacy;
        }
    }
}

/// Applies partial updates to the caller's preferences row.
pub struct UpdatePreferencesOperation<R> {
    preferences: Arc<R>,
}

impl<R: PreferencesStore> UpdatePreferencesOperation<R> {
    #[must_use]
    pub fn new(preferences: Arc<R>) -> Self {
        Self { preferences }
    }

    /// Writes the supplied fields, refreshes `updated_at` and returns the new row.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `ValidationFailed` when `change` carries no
    /// field, `PreferencesNotFound`, or `StorageWriteFailed`.
    pub fn execute<C: PreferenceChange>(
        &self,
        ctx: &RequestContext,
        change: &C,
    ) -> Result<UserPreferences> {
        let user_id = ctx.require_principal()?;
        if change.is_empty() {
            return Err(ValidationErrors::single(ValidationError::NoFieldsProvided).into());
        }

        let now = Utc::now();
        let updated = self
            .preferences
            .modify_preferences(user_id, &mut |row| {
                change.apply(row);
                row.updated_at = now;
            })
            .map_err(OperationError::write(PREFERENCES))?
            .ok_or_else(|| OperationError::PreferencesNotFound(user_id.clone()))?;

        info!(user = %user_id, section = C::SECTION, "updated preferences");
        Ok(updated)
    }
}

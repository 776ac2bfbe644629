use std::sync::Arc;

use chrono::Utc;
use clipstack_core::{PreferenceId, ProfileId, ProfileType, UserId, UserPreferences, UserProfile};
use clipstack_saga::SagaBuilder;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::context::ProfileSagaContext;
use super::saga_data::ProfileDraft;
use super::saga_steps::{
    InsertPreferencesStep, InsertProfileStep, MarkUserProfiledStep, SnapshotUserStep,
};
use super::validator::{self, ValidatedProfile};
use crate::context::RequestContext;
use crate::error::{OperationError, Result};
use crate::traits::{ImageStorage, MediaUpload, PreferencesStore, ProfileStore, UserStore};

/// Raw profile form as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct CreateProfileInput {
    pub display_name: String,
    pub preferred_language: String,
    pub gender: String,
    pub biography: Option<String>,
    pub avatar: Option<MediaUpload>,
    /// `YYYY-MM-DD`
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCreated {
    pub profile_id: ProfileId,
    pub preference_id: PreferenceId,
    pub avatar_url: Option<Url>,
}

/// Creates the caller's profile, preferences row and user flag together.
///
/// The three writes go to independent tables, so they run as a saga: if any
/// write fails, the ones already applied are undone in reverse order and the
/// uploaded avatar is deleted again.
pub struct CreateProfileOperation<U, P, R, I> {
    users: Arc<U>,
    profiles: Arc<P>,
    preferences: Arc<R>,
    images: Arc<I>,
    max_upload_bytes: u64,
}

impl<U, P, R, I> CreateProfileOperation<U, P, R, I>
where
    U: UserStore + 'static,
    P: ProfileStore + 'static,
    R: PreferencesStore + 'static,
    I: ImageStorage,
{
    #[must_use]
    pub fn new(
        users: Arc<U>,
        profiles: Arc<P>,
        preferences: Arc<R>,
        images: Arc<I>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            users,
            profiles,
            preferences,
            images,
            max_upload_bytes,
        }
    }

    /// # Errors
    ///
    /// Returns `Unauthenticated` without a principal, `ValidationFailed` for
    /// bad input, `AvatarUploadFailed` if the avatar cannot be stored, and a
    /// storage or user-update error if the saga had to be rolled back.
    pub fn execute(
        &self,
        ctx: &RequestContext,
        input: CreateProfileInput,
    ) -> Result<ProfileCreated> {
        let user_id = ctx.require_principal()?.clone();
        let profile = validator::validate(input, self.max_upload_bytes)?;

        let avatar_url = match &profile.avatar {
            Some(avatar) => Some(
                self.images
                    .upload(avatar)
                    .map_err(OperationError::AvatarUploadFailed)?,
            ),
            None => None,
        };

        let draft = Self::draft(user_id, profile, avatar_url.clone());
        let created = ProfileCreated {
            profile_id: draft.profile.profile_id,
            preference_id: draft.preferences.preference_id,
            avatar_url,
        };
        let user_id = draft.user_id.clone();

        if let Err(err) = self.run_saga(draft) {
            if let Some(url) = &created.avatar_url {
                self.discard_avatar(url);
            }
            return Err(err);
        }

        info!(
            user = %user_id,
            profile = %created.profile_id,
            "created profile"
        );
        Ok(created)
    }

    fn draft(
        user_id: UserId,
        profile: ValidatedProfile,
        avatar_url: Option<Url>,
    ) -> ProfileDraft {
        let now = Utc::now();
        let preferences = UserPreferences::new(
            PreferenceId::generate(),
            user_id.clone(),
            profile.preferred_language,
            now,
        );
        let profile = UserProfile {
            profile_id: ProfileId::generate(),
            user_id: user_id.clone(),
            display_name: profile.display_name,
            biography: profile.biography,
            avatar_url: avatar_url.as_ref().map(ToString::to_string),
            gender: profile.gender,
            birthday: profile.birthday,
            profile_type: ProfileType::Public,
            follower_count: 0,
            following_count: 0,
            posts_count: 0,
            created_at: now,
            updated_at: now,
        };

        ProfileDraft {
            user_id,
            profile,
            preferences,
            avatar_url,
        }
    }

    fn run_saga(&self, draft: ProfileDraft) -> Result<()> {
        let saga = SagaBuilder::new()
            .first_step(SnapshotUserStep::<U, P, R>::new())
            .then(InsertProfileStep::<U, P, R>::new())
            .then(InsertPreferencesStep::<U, P, R>::new())
            .then(MarkUserProfiledStep::<U, P, R>::new())
            .build();

        let saga_context = ProfileSagaContext::new(
            Arc::clone(&self.users),
            Arc::clone(&self.profiles),
            Arc::clone(&self.preferences),
        );
        let (result, journal) = saga.execute_with_journal(&saga_context, draft);
        debug!(journal = %journal.summary(), "profile saga finished");

        result.map(|_| ()).map_err(Into::into)
    }

    fn discard_avatar(&self, url: &Url) {
        match self.images.delete(url) {
            Ok(()) => debug!(%url, "deleted avatar of failed profile creation"),
            Err(error) => warn!(%url, error = ?error, "failed to delete orphaned avatar"),
        }
    }
}

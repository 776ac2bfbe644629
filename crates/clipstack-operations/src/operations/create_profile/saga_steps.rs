use std::marker::PhantomData;

use clipstack_saga::SagaStep;
use tracing::debug;

use super::context::ProfileSagaContext;
use super::saga_data::{ProfileDraft, ProfileSagaData, UserSnapshot};
use crate::OperationError;
use crate::providers::tables::{PREFERENCES, PROFILES};
use crate::traits::{PreferencesStore, ProfileStore, UserStore};

macro_rules! stateless_step {
    ($name:ident) => {
        pub(super) struct $name<U, P, R> {
            _marker: PhantomData<(U, P, R)>,
        }

        impl<U, P, R> $name<U, P, R> {
            pub(super) fn new() -> Self {
                Self {
                    _marker: PhantomData,
                }
            }
        }
    };
}

stateless_step!(SnapshotUserStep);
stateless_step!(InsertProfileStep);
stateless_step!(InsertPreferencesStep);
stateless_step!(MarkUserProfiledStep);

impl<U, P, R> SagaStep for SnapshotUserStep<U, P, R>
where
    U: UserStore,
    P: ProfileStore,
    R: PreferencesStore,
{
    type Input = ProfileDraft;
    type Output = ProfileSagaData;
    type Context = ProfileSagaContext<U, P, R>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "snapshot_user"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        draft: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let user = ctx
            .users()
            .find_user(&draft.user_id)
            .map_err(|source| OperationError::UserUpdateFailed {
                user_id: draft.user_id.clone(),
                source,
            })?
            .ok_or_else(|| OperationError::UserMissing(draft.user_id.clone()))?;

        let original_user = UserSnapshot {
            has_profile: user.has_profile,
            image: user.image,
        };
        debug!(
            user = %draft.user_id,
            has_profile = original_user.has_profile,
            "captured user state"
        );

        Ok(ProfileSagaData {
            draft,
            original_user,
        })
    }

    fn compensation_description(&self) -> String {
        "nothing to undo for a read".to_string()
    }
}

impl<U, P, R> SagaStep for InsertProfileStep<U, P, R>
where
    U: UserStore,
    P: ProfileStore,
    R: PreferencesStore,
{
    type Input = ProfileSagaData;
    type Output = ProfileSagaData;
    type Context = ProfileSagaContext<U, P, R>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "insert_profile"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        ctx.profiles()
            .insert_profile(&input.draft.profile)
            .map_err(OperationError::write(PROFILES))?;
        debug!(profile = %input.draft.profile.profile_id, "inserted profile");
        Ok(input)
    }

    fn compensate(&self, ctx: &Self::Context, input: Self::Input) -> Result<(), Self::Error> {
        let profile_id = input.draft.profile.profile_id;
        let removed = ctx
            .profiles()
            .delete_profile(&profile_id)
            .map_err(OperationError::write(PROFILES))?;
        debug!(profile = %profile_id, removed, "rolled back profile insert");
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "delete the inserted profile row".to_string()
    }
}

impl<U, P, R> SagaStep for InsertPreferencesStep<U, P, R>
where
    U: UserStore,
    P: ProfileStore,
    R: PreferencesStore,
{
    type Input = ProfileSagaData;
    type Output = ProfileSagaData;
    type Context = ProfileSagaContext<U, P, R>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "insert_preferences"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        ctx.preferences()
            .insert_preferences(&input.draft.preferences)
            .map_err(OperationError::write(PREFERENCES))?;
        debug!(
            preference = %input.draft.preferences.preference_id,
            "inserted preferences"
        );
        Ok(input)
    }

    fn compensate(&self, ctx: &Self::Context, input: Self::Input) -> Result<(), Self::Error> {
        let preference_id = input.draft.preferences.preference_id;
        let removed = ctx
            .preferences()
            .delete_preferences(&preference_id)
            .map_err(OperationError::write(PREFERENCES))?;
        debug!(preference = %preference_id, removed, "rolled back preferences insert");
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "delete the inserted preferences row".to_string()
    }
}

impl<U, P, R> SagaStep for MarkUserProfiledStep<U, P, R>
where
    U: UserStore,
    P: ProfileStore,
    R: PreferencesStore,
{
    type Input = ProfileSagaData;
    type Output = ProfileSagaData;
    type Context = ProfileSagaContext<U, P, R>;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "mark_user_profiled"
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error> {
        let user_id = &input.draft.user_id;
        let image = input.draft.avatar_url.as_ref().map(url::Url::as_str);

        let affected = ctx
            .users()
            .set_profile_state(user_id, true, image)
            .map_err(|source| OperationError::UserUpdateFailed {
                user_id: user_id.clone(),
                source,
            })?;
        if affected == 0 {
            return Err(OperationError::UserNotUpdated(user_id.clone()));
        }

        debug!(user = %user_id, "marked user as profiled");
        Ok(input)
    }

    /// Only runs when a step chained after this one fails.
    fn compensate(&self, ctx: &Self::Context, input: Self::Input) -> Result<(), Self::Error> {
        let user_id = &input.draft.user_id;
        let original = &input.original_user;

        ctx.users()
            .set_profile_state(user_id, original.has_profile, original.image.as_deref())
            .map_err(|source| OperationError::UserUpdateFailed {
                user_id: user_id.clone(),
                source,
            })?;
        debug!(user = %user_id, "restored user profile flag");
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "restore the user's previous profile flag and image".to_string()
    }
}

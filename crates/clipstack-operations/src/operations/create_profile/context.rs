use std::sync::Arc;

use crate::traits::{PreferencesStore, ProfileStore, UserStore};

/// Stores touched by the profile saga. Cheap to clone.
pub(super) struct ProfileSagaContext<U, P, R> {
    users: Arc<U>,
    profiles: Arc<P>,
    preferences: Arc<R>,
}

impl<U, P, R> Clone for ProfileSagaContext<U, P, R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            profiles: Arc::clone(&self.profiles),
            preferences: Arc::clone(&self.preferences),
        }
    }
}

impl<U, P, R> ProfileSagaContext<U, P, R>
where
    U: UserStore,
    P: ProfileStore,
    R: PreferencesStore,
{
    pub(super) fn new(users: Arc<U>, profiles: Arc<P>, preferences: Arc<R>) -> Self {
        Self {
            users,
            profiles,
            preferences,
        }
    }

    pub(super) fn users(&self) -> &U {
        &self.users
    }

    pub(super) fn profiles(&self) -> &P {
        &self.profiles
    }

    pub(super) fn preferences(&self) -> &R {
        &self.preferences
    }
}

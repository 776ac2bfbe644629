use clipstack_core::{UserId, UserPreferences, UserProfile};
use url::Url;

/// Rows the saga is about to write, with every id already generated.
#[derive(Debug, Clone)]
pub(super) struct ProfileDraft {
    pub(super) user_id: UserId,
    pub(super) profile: UserProfile,
    pub(super) preferences: UserPreferences,
    pub(super) avatar_url: Option<Url>,
}

/// User columns the saga overwrites, as they were before it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct UserSnapshot {
    pub(super) has_profile: bool,
    pub(super) image: Option<String>,
}

#[derive(Debug, Clone)]
pub(super) struct ProfileSagaData {
    pub(super) draft: ProfileDraft,
    pub(super) original_user: UserSnapshot,
}

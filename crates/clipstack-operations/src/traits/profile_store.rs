use clipstack_core::{ProfileId, UserId, UserProfile};

use crate::error::StoreError;

pub trait ProfileStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the profile id exists or
    /// the user already has a profile.
    fn insert_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_profile_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Deletes by primary key. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_profile(&self, id: &ProfileId) -> Result<bool, StoreError>;
}

use clipstack_core::{PreferenceId, UserId, UserPreferences};

use crate::error::StoreError;

pub trait PreferencesStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the preference id exists
    /// or the user already has preferences.
    fn insert_preferences(&self, preferences: &UserPreferences) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_preferences_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserPreferences>, StoreError>;

    /// Applies `change` to the user's preferences row as one atomic write and
    /// returns the stored result, or `None` when the user has no row.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn modify_preferences(
        &self,
        user_id: &UserId,
        change: &mut dyn FnMut(&mut UserPreferences),
    ) -> Result<Option<UserPreferences>, StoreError>;

    /// Deletes by primary key. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_preferences(&self, id: &PreferenceId) -> Result<bool, StoreError>;
}

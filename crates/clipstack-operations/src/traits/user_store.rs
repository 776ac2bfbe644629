use clipstack_core::{User, UserId};

use crate::error::StoreError;

pub trait UserStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the id or email is taken.
    fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Sets the profile flag and avatar image on a user row.
    ///
    /// Returns the number of rows affected: `0` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set_profile_state(
        &self,
        id: &UserId,
        has_profile: bool,
        image: Option<&str>,
    ) -> Result<usize, StoreError>;
}

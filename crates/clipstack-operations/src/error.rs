use std::path::PathBuf;

use clipstack_core::UserId;
use clipstack_saga::SagaError;
use thiserror::Error;
use url::Url;

use crate::operations::ValidationErrors;

/// Failure reported by a relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{table}: {constraint} violated")]
    ConstraintViolation {
        table: &'static str,
        constraint: &'static str,
    },

    #[error("failed to read store file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store file '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file '{path}' is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize store contents")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to lock store file '{path}'")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store lock poisoned by a panicked writer")]
    Poisoned,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

/// Failure reported by image storage.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("refusing to store empty file '{0}'")]
    EmptyPayload(String),

    #[error("failed to write media file '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete media file '{path}'")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' was not issued by this storage")]
    ForeignUrl(Url),

    #[error("cannot build a public URL for '{name}'")]
    Url {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("media storage unavailable: {0}")]
    Unavailable(String),
}

/// Coarse failure class, stable across operations, for callers that map
/// errors onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthenticated,
    ValidationFailed,
    AvatarUploadFailed,
    StorageWriteFailed,
    UserUpdateFailed,
    NotFound,
    MediaUploadFailed,
    StorageReadFailed,
}

impl ErrorKind {
    /// HTTP-style status for this kind.
    #[must_use]
    pub fn status_code(self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::ValidationFailed => 400,
            Self::NotFound => 404,
            Self::StorageWriteFailed | Self::UserUpdateFailed | Self::StorageReadFailed => 500,
            Self::AvatarUploadFailed | Self::MediaUploadFailed => 502,
        }
    }
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("validation failed")]
    ValidationFailed(#[from] ValidationErrors),

    #[error("failed to upload avatar")]
    AvatarUploadFailed(#[source] MediaError),

    #[error("failed to upload {media}")]
    MediaUploadFailed {
        media: &'static str,
        #[source]
        source: MediaError,
    },

    #[error("failed to write {table}")]
    StorageWriteFailed {
        table: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("failed to read {table}")]
    StorageReadFailed {
        table: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("user '{0}' does not exist")]
    UserMissing(UserId),

    #[error("user '{0}' was not updated")]
    UserNotUpdated(UserId),

    #[error("failed to update user '{user_id}'")]
    UserUpdateFailed {
        user_id: UserId,
        #[source]
        source: StoreError,
    },

    #[error("no profile found for user '{0}'")]
    ProfileNotFound(UserId),

    #[error("no preferences found for user '{0}'")]
    PreferencesNotFound(UserId),
}

impl OperationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::ValidationFailed(_) => ErrorKind::ValidationFailed,
            Self::AvatarUploadFailed(_) => ErrorKind::AvatarUploadFailed,
            Self::MediaUploadFailed { .. } => ErrorKind::MediaUploadFailed,
            Self::StorageWriteFailed { .. } => ErrorKind::StorageWriteFailed,
            Self::StorageReadFailed { .. } => ErrorKind::StorageReadFailed,
            Self::UserMissing(_) | Self::UserNotUpdated(_) | Self::UserUpdateFailed { .. } => {
                ErrorKind::UserUpdateFailed
            }
            Self::ProfileNotFound(_) | Self::PreferencesNotFound(_) => ErrorKind::NotFound,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    pub(crate) fn write(table: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::StorageWriteFailed { table, source }
    }

    pub(crate) fn read(table: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::StorageReadFailed { table, source }
    }
}

pub type Result<T> = std::result::Result<T, OperationError>;

/// Callers see the failure that stopped the saga. Compensation failures have
/// already been logged by the saga as they happened.
impl From<SagaError<OperationError>> for OperationError {
    fn from(err: SagaError<OperationError>) -> Self {
        err.into_step_error()
    }
}

#[cfg(test)]
mod tests {
    use clipstack_saga::CompensationError;

    use super::*;
    use crate::operations::ValidationError;

    fn user() -> UserId {
        UserId::new("usr_1").expect("valid id")
    }

    #[test]
    fn every_kind_has_a_status() {
        assert_eq!(ErrorKind::Unauthenticated.status_code(), 401);
        assert_eq!(ErrorKind::ValidationFailed.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::StorageWriteFailed.status_code(), 500);
        assert_eq!(ErrorKind::UserUpdateFailed.status_code(), 500);
        assert_eq!(ErrorKind::StorageReadFailed.status_code(), 500);
        assert_eq!(ErrorKind::AvatarUploadFailed.status_code(), 502);
        assert_eq!(ErrorKind::MediaUploadFailed.status_code(), 502);
    }

    #[test]
    fn user_failures_share_one_kind() {
        let source = StoreError::Unavailable("down".to_string());

        assert_eq!(
            OperationError::UserMissing(user()).kind(),
            ErrorKind::UserUpdateFailed
        );
        assert_eq!(
            OperationError::UserNotUpdated(user()).kind(),
            ErrorKind::UserUpdateFailed
        );
        assert_eq!(
            OperationError::UserUpdateFailed {
                user_id: user(),
                source
            }
            .kind(),
            ErrorKind::UserUpdateFailed
        );
    }

    #[test]
    fn validation_failure_is_bad_request() {
        let errors = ValidationErrors::single(ValidationError::Blank {
            field: "display_name",
        });

        let err = OperationError::from(errors);

        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn saga_error_converts_to_step_error_even_when_compensation_failed() {
        let saga_err = SagaError::CompensationFailed {
            failed_step: "mark_user_profiled".to_string(),
            step_error: OperationError::UserNotUpdated(user()),
            compensation_errors: vec![CompensationError {
                step: "insert_profile".to_string(),
                description: "delete profile".to_string(),
                error: OperationError::StorageWriteFailed {
                    table: "user_profiles",
                    source: StoreError::Poisoned,
                },
            }],
        };

        let err = OperationError::from(saga_err);

        assert!(matches!(err, OperationError::UserNotUpdated(_)));
    }

    #[test]
    fn constraint_violation_message_names_table_and_constraint() {
        let err = StoreError::ConstraintViolation {
            table: "user_profiles",
            constraint: "unique user_id",
        };

        assert!(err.is_constraint_violation());
        assert_eq!(err.to_string(), "user_profiles: unique user_id violated");
    }
}

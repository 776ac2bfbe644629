use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid gender '{0}' (expected male, female or other)")]
    InvalidGender(String),

    #[error("invalid account privacy '{0}' (expected public or private)")]
    InvalidPrivacy(String),

    #[error("invalid visibility '{0}' (expected public, friends, private or unlisted)")]
    InvalidVisibility(String),

    #[error("invalid post status '{0}'")]
    InvalidPostStatus(String),

    #[error("birthday '{value}' must be YYYY-MM-DD: {reason}")]
    InvalidBirthday { value: String, reason: &'static str },

    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    #[error("user id cannot be empty")]
    EmptyUserId,
}

pub type Result<T> = std::result::Result<T, CoreError>;

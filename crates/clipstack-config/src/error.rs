use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid media.public-base-url '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("media.public-base-url '{0}' cannot carry path segments")]
    OpaqueBaseUrl(String),

    #[error("media.max-upload-bytes must be greater than zero")]
    ZeroUploadLimit,

    #[error("preferences.default-language '{0}' must be 1 to {max} characters", max = clipstack_core::MAX_LANGUAGE_TAG_CHARS)]
    InvalidDefaultLanguage(String),

    #[error("unknown logging.format '{0}' (expected text or json)")]
    UnknownLogFormat(String),
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load configuration")]
    Config(#[from] clipstack_config::ConfigError),

    #[error("failed to open the data store")]
    Store(#[from] clipstack_operations::StoreError),

    #[error(transparent)]
    Operation(#[from] clipstack_operations::OperationError),

    #[error("invalid user id")]
    InvalidUser(#[source] clipstack_core::CoreError),

    #[error("cannot determine the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to read '{path}'")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode output as JSON")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

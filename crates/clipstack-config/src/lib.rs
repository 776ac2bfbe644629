mod config;
mod error;
mod raw;

pub const CONFIG_FILE_NAME: &str = "clipstack.toml";
pub const DEFAULT_DATA_DIR: &str = ".clipstack/data";
pub const DEFAULT_MEDIA_DIR: &str = ".clipstack/media";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080/media/";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "info";

pub use config::{
    ClipstackConfig, LogFormat, LoggingConfig, MediaConfig, PreferencesConfig, StorageConfig,
};
pub use error::ConfigError;

pub type Result<T> = std::result::Result<T, ConfigError>;

use std::path::{Path, PathBuf};

use clipstack_core::MAX_LANGUAGE_TAG_CHARS;
use url::Url;

use crate::error::ConfigError;
use crate::raw::{RawConfig, RawLogging, RawMedia};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    data_dir: PathBuf,
}

impl StorageConfig {
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    dir: PathBuf,
    public_base_url: Url,
    max_upload_bytes: u64,
}

impl MediaConfig {
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Always ends in `/`, so stored names can be joined onto it.
    #[must_use]
    pub fn public_base_url(&self) -> &Url {
        &self.public_base_url
    }

    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }
}

#[derive(Debug, Clone)]
pub struct PreferencesConfig {
    default_language: String,
}

impl PreferencesConfig {
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    filter: String,
    format: LogFormat,
}

impl LoggingConfig {
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.format
    }
}

/// Resolved `clipstack.toml`. Every section is optional; relative paths are
/// anchored at the directory holding the file.
#[derive(Debug, Clone)]
pub struct ClipstackConfig {
    source: Option<PathBuf>,
    storage: StorageConfig,
    media: MediaConfig,
    preferences: PreferencesConfig,
    logging: LoggingConfig,
}

impl ClipstackConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut config = Self::from_raw(raw, base_dir)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Loads `clipstack.toml` from `dir` when present, otherwise returns the
    /// defaults anchored at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file is unreadable or invalid.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let candidate = dir.join(crate::CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Self::from_raw(RawConfig::default(), dir)
        }
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    #[must_use]
    pub fn media(&self) -> &MediaConfig {
        &self.media
    }

    #[must_use]
    pub fn preferences(&self) -> &PreferencesConfig {
        &self.preferences
    }

    #[must_use]
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    fn from_raw(raw: RawConfig, base_dir: &Path) -> Result<Self, ConfigError> {
        let data_dir = resolve(
            base_dir,
            raw.storage.data_dir.as_deref(),
            crate::DEFAULT_DATA_DIR,
        );

        let default_language = raw
            .preferences
            .default_language
            .unwrap_or_else(|| clipstack_core::DEFAULT_LANGUAGE.to_string());
        let language_len = default_language.trim().chars().count();
        if language_len == 0 || language_len > MAX_LANGUAGE_TAG_CHARS {
            return Err(ConfigError::InvalidDefaultLanguage(default_language));
        }

        Ok(Self {
            source: None,
            storage: StorageConfig { data_dir },
            media: build_media_config(raw.media, base_dir)?,
            preferences: PreferencesConfig { default_language },
            logging: build_logging_config(raw.logging)?,
        })
    }
}

fn resolve(base_dir: &Path, configured: Option<&str>, default: &str) -> PathBuf {
    let path = Path::new(configured.unwrap_or(default));
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn build_media_config(raw: RawMedia, base_dir: &Path) -> Result<MediaConfig, ConfigError> {
    let dir = resolve(base_dir, raw.dir.as_deref(), crate::DEFAULT_MEDIA_DIR);

    let mut value = raw
        .public_base_url
        .unwrap_or_else(|| crate::DEFAULT_PUBLIC_BASE_URL.to_string());
    if !value.ends_with('/') {
        value.push('/');
    }
    let public_base_url = Url::parse(&value).map_err(|source| ConfigError::InvalidBaseUrl {
        value: value.clone(),
        source,
    })?;
    if public_base_url.cannot_be_a_base() {
        return Err(ConfigError::OpaqueBaseUrl(value));
    }

    let max_upload_bytes = raw
        .max_upload_bytes
        .unwrap_or(crate::DEFAULT_MAX_UPLOAD_BYTES);
    if max_upload_bytes == 0 {
        return Err(ConfigError::ZeroUploadLimit);
    }

    Ok(MediaConfig {
        dir,
        public_base_url,
        max_upload_bytes,
    })
}

fn build_logging_config(raw: RawLogging) -> Result<LoggingConfig, ConfigError> {
    let format = match raw.format.as_deref() {
        None | Some("text") => LogFormat::Text,
        Some("json") => LogFormat::Json,
        Some(other) => return Err(ConfigError::UnknownLogFormat(other.to_string())),
    };

    Ok(LoggingConfig {
        filter: raw
            .filter
            .unwrap_or_else(|| crate::DEFAULT_LOG_FILTER.to_string()),
        format,
    })
}

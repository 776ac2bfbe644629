use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub(crate) storage: RawStorage,
    #[serde(default)]
    pub(crate) media: RawMedia,
    #[serde(default)]
    pub(crate) preferences: RawPreferences,
    #[serde(default)]
    pub(crate) logging: RawLogging,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct RawStorage {
    pub(crate) data_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct RawMedia {
    pub(crate) dir: Option<String>,
    pub(crate) public_base_url: Option<String>,
    pub(crate) max_upload_bytes: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct RawPreferences {
    pub(crate) default_language: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawLogging {
    pub(crate) filter: Option<String>,
    pub(crate) format: Option<String>,
}

use std::collections::HashMap;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment as EnvironmentSource, File, FileFormat};
use serde::{Deserialize, Deserializer};

use crate::domain::EngineType;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub asr: AsrSettings,
    pub storage: StorageSettings,
    pub cleanup: CleanupSettings,
    pub crawler: CrawlerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsrSettings {
    pub primary: EngineType,
    pub backup: EngineType,
    pub timeout_secs: u64,
    pub retry_count: u32,
    pub retry_wait_ms: u64,
    pub doubao: DoubaoSettings,
    pub qwen: QwenSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoubaoSettings {
    pub app_id: String,
    pub access_token: String,
    pub endpoint: Option<String>,
    pub resource_id: Option<String>,
    #[serde(default, deserialize_with = "list_or_comma_separated")]
    pub hotwords: Vec<String>,
}

/// Accepts a TOML array or a comma-separated string such as
/// `APP_ASR__DOUBAO__HOTWORDS=podcast,episode`.
fn list_or_comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        Joined(String),
    }

    let items = match ListOrString::deserialize(deserializer)? {
        ListOrString::List(items) => items,
        ListOrString::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

#[derive(Debug, Clone, Deserialize)]
pub struct QwenSettings {
    pub api_key: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub enabled: bool,
    pub provider: StorageProviderSetting,
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub use_ssl: bool,
    pub region: String,
    pub local_path: String,
    pub audio_bucket: String,
    pub transcript_bucket: String,
}

impl StorageSettings {
    pub fn bucket_names(&self) -> Vec<String> {
        vec![self.audio_bucket.clone(), self.transcript_bucket.clone()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Minio,
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupSettings {
    pub interval_secs: u64,
    pub retention_days: u64,
}

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

impl CleanupSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Saturates instead of overflowing for absurdly large day counts.
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_days.saturating_mul(SECONDS_PER_DAY))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Settings {
    /// Defaults, then `appsettings.toml`, then `appsettings.{env}.toml`, then
    /// `APP_`-prefixed environment variables (`__` separates sections).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let env_file = environment.settings_file();

        Self::defaults()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name(&env_file).required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Defaults overlaid with the given `APP_*` variables instead of the
    /// process environment. Files are not read.
    pub fn from_env_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(env_source().source(Some(vars)))
            .build()?
            .try_deserialize()
    }

    /// Defaults overlaid with an inline TOML document. Ignores files and the
    /// process environment.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.max_upload_mb", 200)?
            .set_default("logging.level", "info")?
            .set_default("logging.json_format", false)?
            .set_default("asr.primary", "doubao")?
            .set_default("asr.backup", "qwen")?
            .set_default("asr.timeout_secs", 30)?
            .set_default("asr.retry_count", 2)?
            .set_default("asr.retry_wait_ms", 500)?
            .set_default("asr.doubao.app_id", "")?
            .set_default("asr.doubao.access_token", "")?
            .set_default("asr.qwen.api_key", "")?
            .set_default("storage.enabled", true)?
            .set_default("storage.provider", "minio")?
            .set_default("storage.endpoint", "localhost:9000")?
            .set_default("storage.access_key", "minioadmin")?
            .set_default("storage.secret_key", "minioadmin")?
            .set_default("storage.use_ssl", false)?
            .set_default("storage.region", "us-east-1")?
            .set_default("storage.local_path", "./data/archive")?
            .set_default("storage.audio_bucket", "podcasts-audio")?
            .set_default("storage.transcript_bucket", "asr-results")?
            .set_default("cleanup.interval_secs", 3600)?
            .set_default("cleanup.retention_days", 7)?
            .set_default("crawler.enabled", true)?
            .set_default("crawler.base_url", "http://localhost:8001")?
            .set_default("crawler.timeout_secs", 30)
    }
}

fn env_source() -> EnvironmentSource {
    EnvironmentSource::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

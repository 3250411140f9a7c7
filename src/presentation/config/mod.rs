mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    AsrSettings, CleanupSettings, CrawlerSettings, DoubaoSettings, LoggingSettings,
    QwenSettings, ServerSettings, Settings, StorageProviderSetting, StorageSettings,
};

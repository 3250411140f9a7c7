use std::collections::HashMap;
use std::time::Duration;

use podrelay::domain::EngineType;
use podrelay::presentation::config::{
    CleanupSettings, Environment, Settings, StorageProviderSetting,
};

fn env_vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn given_no_overrides_when_loading_settings_then_defaults_apply() {
    let settings = Settings::from_toml("").unwrap();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.server.max_upload_mb, 200);
    assert_eq!(settings.asr.primary, EngineType::Doubao);
    assert_eq!(settings.asr.backup, EngineType::Qwen);
    assert_eq!(settings.asr.retry_count, 2);
    assert_eq!(settings.asr.retry_wait_ms, 500);
    assert!(settings.asr.doubao.hotwords.is_empty());
    assert_eq!(settings.storage.provider, StorageProviderSetting::Minio);
    assert_eq!(settings.storage.audio_bucket, "podcasts-audio");
    assert_eq!(settings.storage.transcript_bucket, "asr-results");
    assert_eq!(settings.cleanup.interval_secs, 3600);
    assert_eq!(settings.cleanup.retention_days, 7);
    assert!(settings.crawler.enabled);
}

#[test]
fn given_toml_overrides_when_loading_settings_then_they_win_over_defaults() {
    let settings = Settings::from_toml(
        r#"
        [server]
        port = 9100

        [asr.doubao]
        app_id = "app"
        access_token = "token"
        hotwords = ["播客", "小宇宙"]

        [storage]
        enabled = false
        provider = "local"

        [cleanup]
        retention_days = 3
        "#,
    )
    .unwrap();

    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.asr.doubao.app_id, "app");
    assert_eq!(settings.asr.doubao.hotwords.len(), 2);
    assert!(!settings.storage.enabled);
    assert_eq!(settings.storage.provider, StorageProviderSetting::Local);
    assert_eq!(settings.cleanup.retention_days, 3);
    assert_eq!(
        settings.storage.bucket_names(),
        vec!["podcasts-audio".to_string(), "asr-results".to_string()]
    );
}

#[test]
fn given_unknown_engine_when_loading_settings_then_fails() {
    let result = Settings::from_toml(
        r#"
        [asr]
        primary = "whisper"
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values() {
    assert_eq!(Environment::try_from("LOCAL".to_string()).unwrap(), Environment::Local);
    assert_eq!(Environment::try_from("production".to_string()).unwrap(), Environment::Prod);
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_naming_overlay_then_uses_lowercase_file_stem() {
    assert_eq!(Environment::Prod.settings_file(), "appsettings.prod");
    assert_eq!(Environment::default(), Environment::Local);
}

#[test]
fn given_comma_separated_hotwords_env_var_when_loading_then_it_becomes_a_list() {
    let settings = Settings::from_env_vars(env_vars(&[
        ("APP_ASR__DOUBAO__HOTWORDS", "podcast, episode,,host"),
        ("APP_SERVER__PORT", "9200"),
        ("APP_ASR__DOUBAO__ACCESS_TOKEN", "000123"),
    ]))
    .unwrap();

    assert_eq!(
        settings.asr.doubao.hotwords,
        vec!["podcast".to_string(), "episode".to_string(), "host".to_string()]
    );
    assert_eq!(settings.server.port, 9200);
    assert_eq!(settings.asr.doubao.access_token, "000123");
}

#[test]
fn given_hotwords_array_in_toml_when_loading_then_items_are_kept() {
    let settings = Settings::from_toml(
        r#"
        [asr.doubao]
        hotwords = ["podcast", "episode"]
        "#,
    )
    .unwrap();

    assert_eq!(
        settings.asr.doubao.hotwords,
        vec!["podcast".to_string(), "episode".to_string()]
    );
}

#[test]
fn given_huge_retention_days_when_computing_retention_then_it_saturates() {
    let cleanup = CleanupSettings {
        interval_secs: 60,
        retention_days: u64::MAX,
    };

    assert_eq!(cleanup.retention(), Duration::from_secs(u64::MAX));
    assert_eq!(cleanup.interval(), Duration::from_secs(60));
}

#[test]
fn given_week_retention_when_computing_retention_then_converts_days_to_seconds() {
    let cleanup = CleanupSettings {
        interval_secs: 3600,
        retention_days: 7,
    };

    assert_eq!(cleanup.retention(), Duration::from_secs(7 * 24 * 60 * 60));
}

use news_digest::config::{AppConfig, ExclusionMode};
use news_digest::types::DigestError;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults_match_automotive_setup() {
    let config = AppConfig::default();

    assert_eq!(config.sources.len(), 6);
    assert!(config.sources.iter().all(|s| s.enabled));
    assert_eq!(config.filter.max_items, 15);
    assert!(config.filter.include.iter().any(|k| k == "Volkswagen"));
    assert!(config.filter.exclude.iter().any(|k| k == "review"));
    assert_eq!(config.filter.exclusion_mode, ExclusionMode::Independent);
    assert_eq!(config.fetch.pause_ms, 1000);
    assert!(!config.webhook.is_configured());
    assert!(!config.email.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parses_toml_and_fills_missing_sections() {
    let content = r#"
        [[sources]]
        name = "Autocar"
        url = "https://www.autocar.co.uk/rss"

        [[sources]]
        name = "Old Feed"
        url = "https://example.com/rss"
        enabled = false

        [filter]
        include = ["Tesla"]
        exclusion_mode = "within_inclusion"
        max_items = 5

        [report]
        title = "Morning Auto Brief"

        [webhook]
        url = "https://open.feishu.cn/open-apis/bot/v2/hook/abc"
    "#;

    let config = AppConfig::from_toml_str(content).unwrap();

    assert_eq!(config.sources.len(), 2);
    assert_eq!(config.enabled_sources().count(), 1);
    assert_eq!(config.filter.include, vec!["Tesla".to_string()]);
    // Fields missing from a section keep their defaults.
    assert!(config.filter.exclude.iter().any(|k| k == "review"));
    assert_eq!(config.filter.exclusion_mode, ExclusionMode::WithinInclusion);
    assert_eq!(config.filter.max_items, 5);
    assert_eq!(config.report.title, "Morning Auto Brief");
    assert_eq!(config.report.card_template, "blue");
    assert!(config.webhook.is_configured());
    assert_eq!(config.fetch.timeout_seconds, 30);
    assert_eq!(config.source_label(), "Autocar");
}

#[test]
fn test_invalid_toml_is_reported() {
    let result = AppConfig::from_toml_str("[filter\nmax_items = ");
    assert!(matches!(result, Err(DigestError::ConfigParse(_))));
}

#[test]
fn test_environment_overrides_secrets() {
    let mut config = AppConfig::default();
    config.apply_env_overrides(env(&[
        ("FEISHU_WEBHOOK", "https://hooks.example.com/abc"),
        ("SMTP_USER", "digest@example.com"),
        ("SMTP_PASSWORD", "app-password"),
        ("SMTP_PORT", "2525"),
        ("EMAIL_TO", "alice@example.com, bob@example.com,"),
        ("MAX_NEWS_COUNT", "8"),
    ]));

    assert_eq!(config.webhook.url, "https://hooks.example.com/abc");
    assert_eq!(config.email.smtp_user, "digest@example.com");
    assert_eq!(config.email.smtp_password, "app-password");
    assert_eq!(config.email.smtp_port, 2525);
    assert_eq!(config.email.to, vec!["alice@example.com".to_string(), "bob@example.com".to_string()]);
    assert!(config.email.enabled);
    assert_eq!(config.filter.max_items, 8);
    assert!(config.validate().is_ok());
}

#[test]
fn test_blank_or_unparsable_env_values_are_ignored() {
    let mut config = AppConfig::default();
    config.apply_env_overrides(env(&[("FEISHU_WEBHOOK", "  "), ("SMTP_PORT", "not-a-port")]));

    assert!(!config.webhook.is_configured());
    assert_eq!(config.email.smtp_port, 587);
}

#[test]
fn test_validation_errors() {
    let mut config = AppConfig::default();
    config.filter.max_items = 0;
    assert!(matches!(config.validate(), Err(DigestError::Config(_))));

    let mut config = AppConfig::default();
    config.email.enabled = true;
    config.email.smtp_user = "digest@example.com".to_string();
    assert!(matches!(config.validate(), Err(DigestError::Config(_))));

    let mut config = AppConfig::default();
    config.sources[0].url = "not a url".to_string();
    assert!(matches!(config.validate(), Err(DigestError::InvalidUrl(_))));
}

#[test]
fn test_explicit_source_label_wins() {
    let mut config = AppConfig::default();
    assert!(config.source_label().starts_with("Automotive News Europe, Autocar"));

    config.report.source_label = Some("Automotive News Europe, Autocar, Just Auto and more".to_string());
    assert_eq!(config.source_label(), "Automotive News Europe, Autocar, Just Auto and more");
}

#[test]
fn test_example_config_parses() {
    let content = include_str!("../../config/news-digest.example.toml");
    let config = AppConfig::from_toml_str(content).unwrap();

    assert_eq!(config.sources.len(), 6);
    assert_eq!(config.enabled_sources().count(), 5);
    assert_eq!(config.filter.max_items, 15);
    assert!(!config.webhook.is_configured());
    assert!(config.validate().is_ok());
}

fn write_config(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("news-digest-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_load_reads_file_and_validates() {
    let path = write_config("load-ok", "[filter]\nmax_items = 7\n\n[report]\ntitle = \"Loaded\"\n");
    let config = AppConfig::load(Some(path.as_path())).await;
    let _ = std::fs::remove_file(&path);

    let config = config.unwrap();
    assert_eq!(config.report.title, "Loaded");
    assert_eq!(config.sources.len(), 6);
    if std::env::var("MAX_NEWS_COUNT").is_err() {
        assert_eq!(config.filter.max_items, 7);
    }
}

#[tokio::test]
async fn test_load_reports_missing_file() {
    let path = std::env::temp_dir().join("news-digest-does-not-exist.toml");
    let result = AppConfig::load(Some(path.as_path())).await;
    assert!(matches!(result, Err(DigestError::Io(_))));
}

#[tokio::test]
async fn test_load_rejects_invalid_file_values() {
    if std::env::var("MAX_NEWS_COUNT").is_ok() {
        return;
    }

    let path = write_config("load-invalid", "[filter]\nmax_items = 0\n");
    let result = AppConfig::load(Some(path.as_path())).await;
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(DigestError::Config(_))));
}

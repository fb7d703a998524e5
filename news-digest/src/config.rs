use crate::types::{DigestError, FeedEndpoint, FetchConfig, Result};
use email_delivery::EmailSenderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// How the exclusion list relates to the inclusion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionMode {
    /// Each list applies on its own whenever it is non-empty.
    #[default]
    Independent,
    /// Exclusion is only evaluated when the inclusion list is non-empty.
    WithinInclusion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub exclusion_mode: ExclusionMode,
    pub max_items: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let include = [
            "Europe", "European", "Germany", "German",
            "Volkswagen", "BMW", "Mercedes", "Audi", "Porsche",
            "VW", "Daimler", "Opel", "Peugeot", "Renault",
            "Tesla", "electric", "EV", "battery", "charging",
            "sales", "market", "launch", "new model",
            "OEM", "automaker", "car industry",
        ];
        let exclude = [
            "used car", "review", "test drive", "racing",
            "motorsport", "formula", "rally",
        ];

        Self {
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            exclusion_mode: ExclusionMode::default(),
            max_items: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    /// Footer attribution. Defaults to the enabled source names.
    pub source_label: Option<String>,
    /// Header colour template of the chat card.
    pub card_template: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Euro Auto Daily".to_string(),
            source_label: None,
            card_template: "blue".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl WebhookConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub sources: Vec<FeedEndpoint>,
    pub filter: FilterConfig,
    pub report: ReportConfig,
    pub webhook: WebhookConfig,
    pub email: EmailSenderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            sources: default_sources(),
            filter: FilterConfig::default(),
            report: ReportConfig::default(),
            webhook: WebhookConfig::default(),
            email: EmailSenderConfig::default(),
        }
    }
}

/// European and German automotive feeds polled when no config overrides them.
pub fn default_sources() -> Vec<FeedEndpoint> {
    vec![
        FeedEndpoint::new("Automotive News Europe", "https://www.autonews.com/europe/rss.xml"),
        FeedEndpoint::new("Autocar", "https://www.autocar.co.uk/rss"),
        FeedEndpoint::new("Just Auto - Europe", "https://www.just-auto.com/region/europe/feed/"),
        FeedEndpoint::new("Green Car Reports", "https://www.greencarreports.com/rss-feeds"),
        FeedEndpoint::new("Automotive IQ", "https://www.automotive-iq.com/rss-feeds"),
        FeedEndpoint::new("Motor Authority", "https://www.motorauthority.com/rss-feeds"),
    ]
}

impl AppConfig {
    /// Load from an optional TOML file, apply environment overrides, validate.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let content = tokio::fs::read_to_string(path).await?;
                Self::from_toml_str(&content)?
            }
            None => {
                info!("No configuration file given, using built-in defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Secrets and deployment specific values win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup("FEISHU_WEBHOOK") {
            debug!("Webhook URL taken from environment");
            self.webhook.url = url;
        }
        if let Some(server) = lookup("SMTP_SERVER") {
            self.email.smtp_server = server;
        }
        if let Some(port) = lookup("SMTP_PORT").and_then(|p| p.trim().parse().ok()) {
            self.email.smtp_port = port;
        }
        if let Some(user) = lookup("SMTP_USER") {
            self.email.smtp_user = user;
        }
        if let Some(password) = lookup("SMTP_PASSWORD") {
            self.email.smtp_password = password;
        }
        if let Some(recipients) = lookup("EMAIL_TO") {
            self.email.to = recipients
                .split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect();
            self.email.enabled = !self.email.to.is_empty();
        }
        if let Some(max) = lookup("MAX_NEWS_COUNT").and_then(|m| m.trim().parse().ok()) {
            self.filter.max_items = max;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.filter.max_items == 0 {
            return Err(DigestError::Config("filter.max_items must be greater than zero".to_string()));
        }

        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(DigestError::Config(format!("source {} has no name", source.url)));
            }
            url::Url::parse(&source.url)?;
        }

        if self.email.enabled {
            if self.email.smtp_server.trim().is_empty() {
                return Err(DigestError::Config("email.smtp_server is required when email is enabled".to_string()));
            }
            if self.email.smtp_user.trim().is_empty() {
                return Err(DigestError::Config("email.smtp_user is required when email is enabled".to_string()));
            }
            if self.email.to.is_empty() {
                return Err(DigestError::Config("email.to needs at least one recipient".to_string()));
            }
        }

        Ok(())
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = &FeedEndpoint> {
        self.sources.iter().filter(|source| source.enabled)
    }

    /// Footer attribution for rendered reports.
    pub fn source_label(&self) -> String {
        match &self.report.source_label {
            Some(label) => label.clone(),
            None => self
                .enabled_sources()
                .map(|source| source.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

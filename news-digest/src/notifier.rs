use crate::config::{AppConfig, WebhookConfig};
use crate::render::card;
use crate::traits::DeliveryChannel;
use crate::types::{Digest, DigestError, Result};
use async_trait::async_trait;
use email_delivery::{EmailSender, EmailSenderConfig};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

/// Chat webhook that accepts Feishu-style card payloads.
pub struct WebhookChannel {
    client: Client,
    url: String,
}

impl WebhookChannel {
    pub fn new(config: &WebhookConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: config.url.trim().to_string(),
        })
    }

    /// Send a short plain-text message, used to check the webhook setup.
    pub async fn send_text(&self, text: &str) -> Result<()> {
        self.post_json(&card::text_message(text)).await
    }

    /// POST a JSON payload. Success means HTTP 200 and a zero status code in the body.
    pub async fn post_json(&self, payload: &Value) -> Result<()> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(DigestError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body: Value = response.json().await?;
        check_webhook_response(&body)
    }
}

/// Feishu answers `{"code": 0, "msg": "success"}`; older endpoints use
/// `StatusCode` / `StatusMessage` instead.
pub fn check_webhook_response(body: &Value) -> Result<()> {
    let code = body
        .get("code")
        .or_else(|| body.get("StatusCode"))
        .and_then(Value::as_i64);

    match code {
        Some(0) => Ok(()),
        other => {
            let message = body
                .get("msg")
                .or_else(|| body.get("StatusMessage"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            Err(DigestError::WebhookRejected {
                code: other.unwrap_or(-1),
                message,
            })
        }
    }
}

#[async_trait]
impl DeliveryChannel for WebhookChannel {
    fn channel_name(&self) -> String {
        "webhook".to_string()
    }

    async fn deliver(&self, digest: &Digest) -> Result<()> {
        self.post_json(&digest.card).await
    }
}

/// SMTP delivery of the HTML report.
pub struct EmailChannel {
    sender: EmailSender,
}

impl EmailChannel {
    pub fn new(config: EmailSenderConfig) -> Self {
        Self {
            sender: EmailSender::new(config),
        }
    }
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn channel_name(&self) -> String {
        "email".to_string()
    }

    async fn deliver(&self, digest: &Digest) -> Result<()> {
        self.sender.send_digest(digest).await?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct ChannelOutcome {
    pub channel: String,
    pub result: Result<()>,
}

/// Per-channel results of one delivery round.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub outcomes: Vec<ChannelOutcome>,
}

impl DeliveryReport {
    pub fn any_delivered(&self) -> bool {
        self.outcomes.iter().any(|outcome| outcome.result.is_ok())
    }

    pub fn delivered_channels(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .map(|outcome| outcome.channel.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Pushes a digest to every configured channel, independently.
pub struct Notifier {
    channels: Vec<Box<dyn DeliveryChannel>>,
}

impl Notifier {
    pub fn new(channels: Vec<Box<dyn DeliveryChannel>>) -> Self {
        Self { channels }
    }

    /// Webhook when a URL is set, email when enabled.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut channels: Vec<Box<dyn DeliveryChannel>> = Vec::new();

        if config.webhook.is_configured() {
            channels.push(Box::new(WebhookChannel::new(&config.webhook)?));
        } else {
            info!("Webhook not configured, skipping");
        }

        if config.email.enabled {
            channels.push(Box::new(EmailChannel::new(config.email.clone())));
        } else {
            info!("Email delivery disabled, skipping");
        }

        Ok(Self::new(channels))
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub async fn deliver_all(&self, digest: &Digest) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for channel in &self.channels {
            let name = channel.channel_name();
            let result = channel.deliver(digest).await;

            match &result {
                Ok(()) => info!("Delivered digest via {}", name),
                Err(e) => error!("Delivery via {} failed: {}", name, e),
            }

            report.outcomes.push(ChannelOutcome { channel: name, result });
        }

        if report.is_empty() {
            warn!("No delivery channel configured");
        } else if !report.any_delivered() {
            warn!("Digest was not delivered on any channel");
        }

        report
    }
}

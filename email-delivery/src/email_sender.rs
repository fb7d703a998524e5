use crate::error::EmailError;
use interfaces::defs::Digest;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSenderConfig {
    pub enabled: bool,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_name: String,
    pub to: Vec<String>,
    pub subject_prefix: String,
    pub timeout_seconds: u64,
}

impl Default for EmailSenderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_user: String::new(),
            smtp_password: String::new(),
            from_name: "Euro Auto Daily".to_string(),
            to: Vec::new(),
            subject_prefix: "[Euro Auto Daily]".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl EmailSenderConfig {
    /// Subject line for a report dated `date_label`.
    pub fn subject_for(&self, date_label: &str) -> String {
        let prefix = self.subject_prefix.trim();
        if prefix.is_empty() {
            date_label.to_string()
        } else {
            format!("{} {}", prefix, date_label)
        }
    }
}

/// Sends rendered digests over authenticated SMTP with STARTTLS.
pub struct EmailSender {
    config: EmailSenderConfig,
}

impl EmailSender {
    pub fn new(config: EmailSenderConfig) -> Self {
        Self { config }
    }

    /// Build the multipart/alternative message: the text report as the plain
    /// part and the HTML document as the preferred part.
    pub fn build_message(&self, digest: &Digest) -> Result<Message, EmailError> {
        if self.config.to.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        let from_address = parse_address(&self.config.smtp_user)?;
        let from_name = Some(self.config.from_name.clone()).filter(|name| !name.trim().is_empty());
        let mut builder = Message::builder()
            .from(Mailbox::new(from_name, from_address))
            .subject(self.config.subject_for(&digest.date_label));

        for recipient in &self.config.to {
            builder = builder.to(Mailbox::new(None, parse_address(recipient)?));
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            digest.text.clone(),
            digest.html.clone(),
        ))?;

        Ok(message)
    }

    pub async fn send_digest(&self, digest: &Digest) -> Result<(), EmailError> {
        let message = self.build_message(digest)?;

        debug!(
            "Connecting to SMTP server {}:{} as {}",
            self.config.smtp_server, self.config.smtp_port, self.config.smtp_user
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.smtp_user.clone(),
                self.config.smtp_password.clone(),
            ))
            .timeout(Some(Duration::from_secs(self.config.timeout_seconds)))
            .build();

        let response = mailer.send(message).await?;
        info!(
            "Email sent to {} recipient(s), SMTP response code {}",
            self.config.to.len(),
            response.code()
        );
        Ok(())
    }
}

fn parse_address(address: &str) -> Result<Address, EmailError> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|source| EmailError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

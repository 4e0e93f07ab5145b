use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use std::time::Duration;

use crate::config::Config;

pub const SENT_DETAIL: &str = "Email sent successfully";

/// A single message to relay. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: Address,
    pub subject: String,
    pub body: String,
}

impl OutboundMessage {
    pub fn new(to: &str, subject: String, body: String) -> Result<Self, EmailServiceError> {
        Ok(Self {
            recipient: to.trim().parse()?,
            subject,
            body,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmailServiceError {
    #[error("Invalid email address format: {0}")]
    AddressFormat(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    SmtpTransport(#[from] lettre::transport::smtp::Error),

    #[error("Failed to connect to SMTP relay: {0}")]
    SmtpRelay(lettre::transport::smtp::Error),

    #[error("SMTP session timed out after {0:?}")]
    Timeout(Duration),
}

/// `Ok` carries the human-readable outcome, `Err` the cause of failure.
pub type SendResult = Result<String, EmailServiceError>;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> SendResult;
}

/// Relays messages through an authenticated STARTTLS submission server.
///
/// Every call opens its own session; nothing is pooled or shared between
/// calls, so the connection is gone once `send` returns.
pub struct SmtpMailer {
    sender: Mailbox,
    credentials: Credentials,
    smtp_host: String,
    smtp_port: u16,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, EmailServiceError> {
        Ok(Self {
            sender: Mailbox::new(None, config.owner_email.parse()?),
            credentials: Credentials::new(
                config.owner_email.clone(),
                config.email_password.clone(),
            ),
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
            timeout: config.smtp_timeout,
        })
    }

    fn build_message(&self, message: &OutboundMessage) -> Result<Message, EmailServiceError> {
        Ok(Message::builder()
            .from(self.sender.clone())
            .to(Mailbox::new(None, message.recipient.clone()))
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailServiceError> {
        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_host)
                .map_err(EmailServiceError::SmtpRelay)?
                .port(self.smtp_port)
                .credentials(self.credentials.clone())
                .timeout(Some(self.timeout))
                .build(),
        )
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: OutboundMessage) -> SendResult {
        let email = self.build_message(&message)?;
        let mailer = self.transport()?;

        tracing::info!(
            "Sending email to '{}' with subject '{}' via {}:{}",
            message.recipient,
            message.subject,
            self.smtp_host,
            self.smtp_port
        );

        // Per-command timeouts alone do not bound a slow-drip server.
        tokio::time::timeout(self.timeout, mailer.send(email))
            .await
            .map_err(|_| EmailServiceError::Timeout(self.timeout))??;

        tracing::info!("Message to {} sent successfully", message.recipient);

        Ok(SENT_DETAIL.to_string())
    }
}

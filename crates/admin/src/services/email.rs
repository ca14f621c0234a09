//! Transactional email over SMTP.
//!
//! Unlike the storefront's confirmation mails, an inquiry reply is the
//! primary operation: when SMTP fails the handler fails and nothing is
//! recorded on the thread.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// Errors from sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport could not be constructed.
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Message could not be built.
    #[error("message build error: {0}")]
    Message(#[from] lettre::error::Error),

    /// An address failed to parse.
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
}

/// SMTP email sender.
pub struct EmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailService {
    /// Build the SMTP transport from configuration.
    ///
    /// Uses STARTTLS on the configured port.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::Transport` if the relay is misconfigured.
    /// Returns `EmailError::Address` if the from address is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.expose_secret().to_string(),
            ))
            .build();

        let from: Mailbox = config.from_address.parse()?;

        Ok(Self { transport, from })
    }

    /// The configured from address, recorded on outbound messages.
    #[must_use]
    pub fn from_address(&self) -> String {
        self.from.email.to_string()
    }

    /// Send an inquiry reply to the customer.
    ///
    /// Errors propagate; the reply must not be recorded as sent when it
    /// was not.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the message cannot be built or sent.
    pub async fn send_inquiry_reply(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;

        Ok(())
    }
}

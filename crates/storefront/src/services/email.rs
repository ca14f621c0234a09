//! Transactional email over SMTP.
//!
//! Order confirmations and inquiry acknowledgements are best-effort:
//! callers log failures and continue, the primary operation never
//! rolls back because SMTP was down.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use thiserror::Error;

use cedarline_core::Email;

use crate::config::EmailConfig;
use crate::models::order::OrderWithItems;

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

    /// Send an order confirmation to the customer.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the message cannot be built or sent.
    pub async fn send_order_confirmation(
        &self,
        to: &Email,
        name: &str,
        order: &OrderWithItems,
    ) -> Result<(), EmailError> {
        let mut lines = vec![
            format!("Hi {name},"),
            String::new(),
            format!(
                "Thanks for your order #{}. We will confirm it shortly.",
                order.order.id
            ),
            String::new(),
        ];
        for item in &order.items {
            lines.push(format!(
                "  {} x{} at {}",
                item.name_en, item.quantity, item.unit_price
            ));
        }
        lines.push(String::new());
        lines.push(format!("Total: {}", order.order.total));
        lines.push(String::new());
        lines.push("Cedarline Furniture".to_string());

        self.send_plain(
            to,
            &format!("Order confirmation #{}", order.order.id),
            &lines.join("\n"),
        )
        .await
    }

    /// Acknowledge receipt of a customer inquiry.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the message cannot be built or sent.
    pub async fn send_inquiry_ack(
        &self,
        to: &Email,
        name: &str,
        subject: &str,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Hi {name},\n\nWe received your inquiry \"{subject}\" and will reply within \
             two business days.\n\nCedarline Furniture"
        );

        self.send_plain(to, &format!("Re: {subject}"), &body).await
    }

    async fn send_plain(&self, to: &Email, subject: &str, body: &str) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.as_str().parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;

        Ok(())
    }
}

//! Production server setup code

use crate::{
    models::email_verification::VerificationEmail,
    settings,
    setups::{ServerSetup, VerificationCodeSender},
};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

/// Production implementation of `ServerSetup`.
/// Actually delivers emails through the SMTP relay configured in `settings.toml`.
#[derive(Clone, Debug, Default)]
pub struct ProdSetup;

impl ServerSetup for ProdSetup {
    type VerificationCodeSender = SmtpCodeSender;
}

#[derive(Clone)]
/// Sends verification codes over email, via authenticated SMTP with STARTTLS
pub struct SmtpCodeSender {
    sender: Mailbox,
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
}

impl std::fmt::Debug for SmtpCodeSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCodeSender")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl SmtpCodeSender {
    /// Create a new SmtpCodeSender.
    ///
    /// Fails if the sender address is invalid or the relay can't be set up.
    /// No connection is made until the first email is sent.
    pub fn new(settings: &settings::Smtp) -> Result<Self> {
        let address: Address = settings
            .from_address
            .parse()
            .with_context(|| format!("Invalid sender address {:?}", settings.from_address))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .with_context(|| format!("Couldn't set up SMTP relay {}", settings.host))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(settings.timeout()))
            .build();

        Ok(Self {
            sender: Mailbox::new(Some(settings.from_name.clone()), address),
            transport: Arc::new(transport),
        })
    }

    fn message(&self, email: &VerificationEmail) -> Result<Message> {
        let recipient: Mailbox = email
            .recipient
            .parse()
            .with_context(|| format!("Invalid recipient address {:?}", email.recipient))?;

        Ok(Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?)
    }
}

#[async_trait]
impl VerificationCodeSender for SmtpCodeSender {
    /// Sends the code to the user
    async fn send_code(&self, email: &VerificationEmail) -> Result<()> {
        let message = self.message(email)?;

        tracing::debug!(
            recipient = %email.recipient,
            subject = %email.subject,
            "Sending verification email"
        );

        self.transport.send(message).await?;

        Ok(())
    }
}

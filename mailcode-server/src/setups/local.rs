//! Server setup for local development & easier integration testing

use super::{ServerSetup, VerificationCodeSender};
use crate::models::email_verification::VerificationEmail;
use anyhow::Result;
use async_trait::async_trait;

/// Implementation of `ServerSetup` for local environments.
/// This allows you to run the server without SMTP credentials.
#[derive(Debug, Clone)]
pub struct LocalSetup;

impl ServerSetup for LocalSetup {
    type VerificationCodeSender = LogCodeSender;
}

/// A `VerificationCodeSender` that doesn't actually send emails,
/// but instead logs them via tracing.
#[derive(Debug, Clone, Default)]
pub struct LogCodeSender;

#[async_trait]
impl VerificationCodeSender for LogCodeSender {
    async fn send_code(&self, email: &VerificationEmail) -> Result<()> {
        tracing::info!(
            recipient = %email.recipient,
            subject = %email.subject,
            body = %email.body,
            "verification email (not sent in local setup)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcode_core::code::VerificationCode;
    use testresult::TestResult;

    #[test_log::test(tokio::test)]
    async fn test_log_sender_never_fails() -> TestResult {
        let code = VerificationCode::generate();

        LogCodeSender
            .send_code(&VerificationEmail::new("a@b.com", &code))
            .await?;

        Ok(())
    }
}

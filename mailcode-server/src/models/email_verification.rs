//! Email Verification Model
use dashmap::DashMap;
use mailcode_core::code::VerificationCode;

/// Subject line of every verification email.
pub const SUBJECT: &str = "Код подтверждения для регистрации";

/// Errors arising while issuing or checking verification codes.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    /// The send request didn't include an email address.
    #[error("Email не указан")]
    EmailMissing,
    /// The verify request is missing the email address or the code.
    #[error("Email или код не указаны")]
    EmailOrCodeMissing,
    /// There's no pending code for the address, or it differs.
    #[error("Неверный код")]
    InvalidCode,
    /// The mail sender couldn't deliver the code.
    #[error(transparent)]
    Transport(anyhow::Error),
}

/// A verification email, ready to be handed to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    /// Address the email is delivered to
    pub recipient: String,
    /// Subject line
    pub subject: String,
    /// Plain text body
    pub body: String,
}

impl VerificationEmail {
    /// Compose the email that delivers `code` to `recipient`.
    pub fn new(recipient: &str, code: &VerificationCode) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: SUBJECT.to_string(),
            body: format!("Ваш код подтверждения: {code}"),
        }
    }
}

/// Pending verification codes, at most one per email address.
///
/// Entries live until they are consumed by a successful verification or
/// replaced by a newer code. Nothing expires.
#[derive(Debug, Default)]
pub struct VerificationRegistry {
    codes: DashMap<String, VerificationCode>,
}

impl VerificationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new code for `email`, replacing any pending one.
    pub fn issue_code(&self, email: &str) -> VerificationCode {
        let code = VerificationCode::generate();

        tracing::debug!(email, "Issuing email verification code");

        self.codes.insert(email.to_string(), code.clone());
        code
    }

    /// Check `code` against the pending code for `email`.
    ///
    /// On a match the code is consumed, making it impossible to use again.
    /// A mismatch leaves the pending code in place.
    pub fn verify_code(&self, email: &str, code: &str) -> Result<(), VerificationError> {
        tracing::debug!(email, "Looking up email verification code");

        match self.codes.remove_if(email, |_, pending| pending.matches(code)) {
            Some(_) => {
                tracing::debug!(email, "Consumed email verification code");
                Ok(())
            }
            None => Err(VerificationError::InvalidCode),
        }
    }

    /// The code currently pending for `email`, if any.
    pub fn pending_code(&self, email: &str) -> Option<VerificationCode> {
        self.codes.get(email).map(|entry| entry.value().clone())
    }

    /// Number of addresses with a pending code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no codes are pending.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

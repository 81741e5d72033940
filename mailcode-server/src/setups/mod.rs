//! This abstracts mailcode server side-effects into "setups".
//!
//! This module defines the trait, submodules define test & production
//! collections of implementations.
use crate::models::email_verification::VerificationEmail;
use anyhow::Result;
use async_trait::async_trait;

pub mod local;
pub mod prod;

/// This trait groups type parameters to the server's `AppState` struct.
///
/// It captures the setup of the server, distinguishing between e.g.
/// unit testing & production setups.
pub trait ServerSetup: Clone + Send + Sync + 'static {
    /// Which implementation to use to send verification codes
    type VerificationCodeSender: VerificationCodeSender;
}

/// The service that sends account verification codes
#[async_trait]
pub trait VerificationCodeSender: Clone + Send + Sync + 'static {
    /// Deliver the email carrying a verification code
    async fn send_code(&self, email: &VerificationEmail) -> Result<()>;
}

//! The Axum Application State

use crate::{models::email_verification::VerificationRegistry, setups::ServerSetup};
use anyhow::{anyhow, Result};
use std::sync::Arc;

#[derive(Clone)]
/// Global application route state.
pub struct AppState<S: ServerSetup> {
    /// Pending verification codes
    pub registry: Arc<VerificationRegistry>,
    /// The service that sends account verification codes
    pub verification_code_sender: S::VerificationCodeSender,
    /// Whether issued codes are echoed back in the send response
    pub echo_code: bool,
}

/// Builder for [`AppState`]
#[derive(Debug)]
pub struct AppStateBuilder<S: ServerSetup> {
    registry: Option<Arc<VerificationRegistry>>,
    verification_code_sender: Option<S::VerificationCodeSender>,
    echo_code: bool,
}

impl<S: ServerSetup> Default for AppStateBuilder<S> {
    fn default() -> Self {
        Self {
            registry: None,
            verification_code_sender: None,
            echo_code: true,
        }
    }
}

impl<S: ServerSetup> AppStateBuilder<S> {
    /// Finalize the builder and return the [`AppState`]
    pub fn finalize(self) -> Result<AppState<S>> {
        let registry = self.registry.unwrap_or_default();

        let verification_code_sender = self
            .verification_code_sender
            .ok_or_else(|| anyhow!("verification_code_sender is required"))?;

        Ok(AppState {
            registry,
            verification_code_sender,
            echo_code: self.echo_code,
        })
    }

    /// Share an existing registry instead of starting with an empty one
    pub fn with_registry(mut self, registry: Arc<VerificationRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the service that sends account verification codes
    pub fn with_verification_code_sender(
        mut self,
        verification_code_sender: S::VerificationCodeSender,
    ) -> Self {
        self.verification_code_sender = Some(verification_code_sender);
        self
    }

    /// Set whether issued codes are echoed back in the send response
    pub fn with_echo_code(mut self, echo_code: bool) -> Self {
        self.echo_code = echo_code;
        self
    }
}

impl<S> std::fmt::Debug for AppState<S>
where
    S: ServerSetup,
    S::VerificationCodeSender: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("registry", &self.registry)
            .field("verification_code_sender", &self.verification_code_sender)
            .field("echo_code", &self.echo_code)
            .finish()
    }
}

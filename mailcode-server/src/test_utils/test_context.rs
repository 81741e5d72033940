//! Helpers for running isolated webserver instances
use crate::{
    app_state::{AppState, AppStateBuilder},
    router::setup_app_router,
    setups::test::{TestSetup, TestVerificationCodeSender},
};
use anyhow::Result;
use axum::Router;

/// A reference to an in-process mailcode server in an isolated test environment
#[derive(Debug)]
pub struct TestContext {
    app: Router,
    app_state: AppState<TestSetup>,
}

impl TestContext {
    /// Create a new test context
    pub fn new() -> Result<Self> {
        Self::new_with_state(|builder| builder)
    }

    pub fn new_with_state<F>(f: F) -> Result<Self>
    where
        F: FnOnce(AppStateBuilder<TestSetup>) -> AppStateBuilder<TestSetup>,
    {
        let builder = AppStateBuilder::default()
            .with_verification_code_sender(TestVerificationCodeSender::default());

        let app_state = f(builder).finalize()?;

        let app = setup_app_router(app_state.clone());

        Ok(Self { app, app_state })
    }

    pub fn app(&self) -> Router {
        self.app.clone()
    }

    pub fn verification_code_sender(&self) -> &TestVerificationCodeSender {
        &self.app_state.verification_code_sender
    }

    pub fn app_state(&self) -> &AppState<TestSetup> {
        &self.app_state
    }
}

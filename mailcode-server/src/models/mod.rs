//! Models

pub mod email_verification;

//! Numeric email verification codes

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use utoipa::ToSchema;

/// Range codes are drawn from.
///
/// The lower bound has six digits, so rendered codes never need padding.
pub const CODE_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// A six digit verification code, as sent to the user.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a fresh code using the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate a fresh code using the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(CODE_RANGE).to_string())
    }

    /// The decimal representation of this code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a code submitted by a user is exactly this code.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl std::fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VerificationCode").field(&self.0).finish()
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for VerificationCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

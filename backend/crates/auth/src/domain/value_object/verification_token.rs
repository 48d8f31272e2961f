//! Verification Token Value Object
//!
//! Single-use email verification token. Only the pending user row holds it;
//! it is cleared on successful verification.

use chrono::{DateTime, Duration, Utc};
use platform::crypto::random_hex_token;

/// Random bytes per token (64 hex characters)
const VERIFICATION_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn generate() -> Self {
        Self(random_hex_token(VERIFICATION_TOKEN_BYTES))
    }

    pub fn from_db(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outstanding verification: token plus the instant it stops being accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub token: VerificationToken,
    pub expires_at: DateTime<Utc>,
}

impl PendingVerification {
    /// New token valid for `ttl` from now
    pub fn issue(ttl: Duration) -> Self {
        Self {
            token: VerificationToken::generate(),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Accepted strictly before the expiry instant
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

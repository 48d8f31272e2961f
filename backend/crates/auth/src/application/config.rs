//! Application Configuration
//!
//! Configuration for the Auth application layer. Values come from the
//! environment via the api binary; tests use [`AuthConfig::development`].

use std::fmt;
use std::time::Duration;

use chrono::TimeDelta;
use platform::crypto::random_bytes;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for access tokens
    pub access_token_secret: Vec<u8>,
    /// HMAC secret for refresh tokens
    pub refresh_token_secret: Vec<u8>,
    /// Access token lifetime (7 days)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (30 days)
    pub refresh_token_ttl: Duration,
    /// Email verification window (24 hours)
    pub verification_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Base URL the verification link points at
    pub frontend_url: String,
}

impl AuthConfig {
    pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);
    pub const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 3600);
    pub const DEFAULT_VERIFICATION_TTL: Duration = Duration::from_secs(24 * 3600);
    pub const DEFAULT_FRONTEND_URL: &'static str = "http://localhost:3000";
    /// Upper bound for every lifetime (ten years)
    pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

    /// Config with default lifetimes; the refresh secret falls back to the
    /// access secret when not given
    pub fn new(access_token_secret: Vec<u8>, refresh_token_secret: Option<Vec<u8>>) -> Self {
        Self {
            refresh_token_secret: refresh_token_secret
                .unwrap_or_else(|| access_token_secret.clone()),
            access_token_secret,
            access_token_ttl: Self::DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: Self::DEFAULT_REFRESH_TOKEN_TTL,
            verification_ttl: Self::DEFAULT_VERIFICATION_TTL,
            password_pepper: None,
            frontend_url: Self::DEFAULT_FRONTEND_URL.to_string(),
        }
    }

    /// Create config with random secrets (for development and tests)
    pub fn development() -> Self {
        Self::new(random_bytes(32), Some(random_bytes(32)))
    }

    /// A lifetime as a chrono delta, clamped to [`Self::MAX_TTL`] so expiry
    /// arithmetic cannot overflow
    pub fn delta(ttl: Duration) -> TimeDelta {
        let secs = i64::try_from(ttl.min(Self::MAX_TTL).as_secs()).unwrap_or(i64::MAX);
        TimeDelta::try_seconds(secs).unwrap_or(TimeDelta::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Link mailed to a newly registered user
    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/verify-email?token={}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"[REDACTED]")
            .field("refresh_token_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("verification_ttl", &self.verification_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}
